//! Key derivation and signing for account-level query methods.
//!
//! The session dispatcher never touches keys. Only the thin wrappers that derive an
//! address from a passphrase go through [`KeyDeriver`].

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::http::AccountKeys;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
}

/// Turns a secret passphrase into keys, an address and signatures.
pub trait KeyDeriver: Send + Sync {
    fn derive_keys(&self, secret: &str) -> AccountKeys;

    /// Address for a hex-encoded public key.
    fn derive_address(&self, public_key: &str) -> Result<String, CryptoError>;

    /// Hex-encoded signature over `message`.
    fn sign(&self, secret: &str, message: &[u8]) -> String;
}

/// Ed25519 keys seeded with the SHA-256 of the passphrase.
///
/// Addresses are the first eight bytes of the SHA-256 of the public key, read as a
/// little-endian `u64`, followed by `L`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519KeyDeriver;

impl Ed25519KeyDeriver {
    fn signing_key(secret: &str) -> SigningKey {
        let seed: [u8; 32] = Sha256::digest(secret.as_bytes()).into();
        SigningKey::from_bytes(&seed)
    }

    pub fn verify(public_key: &str, message: &[u8], signature: &str) -> Result<bool, CryptoError> {
        let key = verifying_key(public_key)?;
        let bytes: [u8; 64] = hex::decode(signature)
            .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?
            .try_into()
            .map_err(|_| CryptoError::InvalidSignature("signature must be 64 bytes".to_string()))?;
        let signature = ed25519_dalek::Signature::from_bytes(&bytes);
        Ok(key.verify(message, &signature).is_ok())
    }
}

fn verifying_key(public_key: &str) -> Result<VerifyingKey, CryptoError> {
    let bytes: [u8; 32] = hex::decode(public_key)
        .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?
        .try_into()
        .map_err(|_| CryptoError::InvalidPublicKey("public key must be 32 bytes".to_string()))?;
    VerifyingKey::from_bytes(&bytes).map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
}

impl KeyDeriver for Ed25519KeyDeriver {
    fn derive_keys(&self, secret: &str) -> AccountKeys {
        let signing_key = Self::signing_key(secret);
        AccountKeys {
            public_key: hex::encode(signing_key.verifying_key().to_bytes()),
            private_key: hex::encode(signing_key.to_keypair_bytes()),
        }
    }

    fn derive_address(&self, public_key: &str) -> Result<String, CryptoError> {
        let key = verifying_key(public_key)?;
        let hash = Sha256::digest(key.as_bytes());
        let mut head = [0u8; 8];
        head.copy_from_slice(&hash[..8]);
        Ok(format!("{}L", u64::from_le_bytes(head)))
    }

    fn sign(&self, secret: &str, message: &[u8]) -> String {
        hex::encode(Self::signing_key(secret).sign(message).to_bytes())
    }
}
