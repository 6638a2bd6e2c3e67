use std::fs;
use std::path::Path;

use ed25519_dalek::{Signature, Signer as _, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;

use super::{AuthError, Signer};

pub struct Ed25519Signer {
    keypair: SigningKey,
}

impl Ed25519Signer {
    pub fn new(keypair: SigningKey) -> Self {
        Self { keypair }
    }

    pub fn generate() -> Self {
        let mut csprng = OsRng;
        Self::new(SigningKey::generate(&mut csprng))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AuthError> {
        let seed: &[u8; 32] = bytes
            .try_into()
            .map_err(|_| AuthError::InvalidKey(format!("expected 32-byte seed, got {}", bytes.len())))?;
        Ok(Self::new(SigningKey::from_bytes(seed)))
    }

    /// Loads a signer from a raw seed file, generating and saving a fresh
    /// keypair when the file does not exist yet.
    ///
    /// Some key files carry a 4-byte type/length header before the seed;
    /// the offset is decided by total length.
    pub fn load_or_generate(path: &Path) -> Result<Self, AuthError> {
        if path.exists() {
            let raw = fs::read(path)?;
            let offset = if raw.len() == 36 { 4 } else { 0 };
            if raw.len() < offset + 32 {
                return Err(AuthError::InvalidKey(format!(
                    "key file {} too small: {} bytes",
                    path.display(),
                    raw.len()
                )));
            }
            Self::from_bytes(&raw[offset..offset + 32])
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let signer = Self::generate();
            fs::write(path, signer.keypair.to_bytes())?;
            Ok(signer)
        }
    }
}

impl Signer for Ed25519Signer {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, AuthError> {
        let signature = self.keypair.sign(message);
        Ok(signature.to_vec())
    }

    fn verify(&self, message: &[u8], signature: &[u8; 64]) -> Result<bool, AuthError> {
        let verifying_key: VerifyingKey = self.keypair.verifying_key();
        let signature = Signature::from_slice(signature)
            .map_err(|e| AuthError::InvalidSignature(e.to_string()))?;

        match verifying_key.verify(message, &signature) {
            Ok(_) => Ok(true),
            Err(_) => Ok(false),
        }
    }

    fn public_key(&self) -> Vec<u8> {
        self.keypair.verifying_key().to_bytes().to_vec()
    }
}
