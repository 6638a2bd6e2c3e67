use thiserror::Error;

use arbiter_registry::RegistryError;

/// Recoverable reasons a partition's cycle gets skipped.
///
/// The vote loop logs these and moves on to the next partition; nothing
/// here aborts the loop.
#[derive(Debug, Error)]
pub enum CycleError {
    /// Discovery failed; there is nothing to dispatch to.
    #[error("Registry unavailable: {0}")]
    Registry(#[from] RegistryError),

    /// The task source could not produce a sample task.
    #[error("Task source failure: {0}")]
    TaskSource(String),
}
