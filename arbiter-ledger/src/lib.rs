pub mod client;
pub mod error;
pub mod submitter;

pub use client::{HttpLedgerClient, LedgerClient, VoteReceipt};
pub use error::LedgerError;
pub use submitter::Submitter;
