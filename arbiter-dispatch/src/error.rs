use thiserror::Error;

/// Errors raised by one outbound worker call.
///
/// None of these abort the fan-out: the affected endpoint yields a
/// `WorkerResponse` with no payload and gets the fallback score downstream.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The call did not resolve within the per-call timeout.
    #[error("Worker call timed out after {0}s")]
    Timeout(u64),

    /// The worker could not be reached or the connection broke mid-call.
    #[error("Worker transport failure: {0}")]
    Transport(String),

    /// The worker answered with a non-success HTTP status.
    #[error("Worker returned status {0}")]
    Status(u16),
}
