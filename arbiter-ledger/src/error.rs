use thiserror::Error;

use arbiter_common::auth::AuthError;

/// Errors raised while submitting a weight vector to the ledger.
///
/// All variants are non-fatal to the vote loop: the failure is logged and
/// the next cycle proceeds regardless.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The ledger processed the call and explicitly refused it.
    #[error("Ledger rejected the vote: {0}")]
    Rejected(String),

    /// The gateway could not be reached or the call failed in transit.
    #[error("Ledger transport failure: {0}")]
    Transport(String),

    /// The gateway answered with a non-success HTTP status.
    #[error("Ledger returned status {0}")]
    Status(u16),

    /// The vote call could not be signed.
    #[error("Vote signing failed: {0}")]
    Signing(#[from] AuthError),
}

impl From<reqwest::Error> for LedgerError {
    fn from(e: reqwest::Error) -> Self {
        LedgerError::Transport(e.to_string())
    }
}
