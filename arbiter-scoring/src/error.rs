use thiserror::Error;

/// Errors raised while resolving scoring collaborators.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// The configured processor key does not name a registered strategy.
    #[error("Unknown work processor: {0}")]
    UnknownProcessor(String),
}
