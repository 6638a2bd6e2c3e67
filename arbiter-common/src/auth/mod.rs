pub mod ed25519;

pub use ed25519::Ed25519Signer;

use thiserror::Error;

/// Errors raised while loading key material or producing signatures.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The key file exists but does not contain a usable 32-byte seed.
    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    /// A signature could not be parsed or has the wrong length.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// The key file could not be read or written.
    #[error("Key file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Signing collaborator injected into the consensus submitter.
///
/// Key material stays behind this seam; the scoring and normalization
/// crates never see it.
pub trait Signer: Send + Sync {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, AuthError>;
    fn verify(&self, message: &[u8], signature: &[u8; 64]) -> Result<bool, AuthError>;
    fn public_key(&self) -> Vec<u8>;
}
