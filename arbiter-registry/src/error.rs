use thiserror::Error;

/// Errors raised while querying the registry service.
///
/// All of these are recoverable from the vote loop's point of view: the
/// affected partition is skipped for the current cycle and retried on the
/// next tick.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry could not be reached or the request failed in transit.
    #[error("Registry transport failure: {0}")]
    Transport(String),

    /// The registry answered with a non-success HTTP status.
    #[error("Registry returned status {0}")]
    Status(u16),

    /// The response body did not parse as the expected uid-keyed map.
    #[error("Malformed registry response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for RegistryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            RegistryError::Malformed(e.to_string())
        } else {
            RegistryError::Transport(e.to_string())
        }
    }
}
