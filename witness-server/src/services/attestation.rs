//! Attestation Signing Service
//!
//! Signs prepared digests so downstream consumers can tell which server
//! produced a witness. The key pair is the opaque sign/verify capability the
//! commitment flow expects.

use crate::types::Attestation;
use commitment_core::Digest;
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use sha2::{Digest as _, Sha256};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttestationError {
    #[error("Failed to sign attestation: {0}")]
    SigningError(String),
}

/// Attestation signer service
pub struct AttestationSigner {
    /// Server signing key (Ed25519)
    signing_key: SigningKey,
}

impl AttestationSigner {
    /// Create a new attestation signer
    pub fn new(secret_key_bytes: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(secret_key_bytes),
        }
    }

    /// Create from a hex secret, or a random key for development
    pub fn from_secret_hex(secret_hex: Option<&str>) -> Result<Self, AttestationError> {
        let secret_hex = match secret_hex {
            Some(hex) => hex.to_string(),
            None => {
                let key: [u8; 32] = rand::random();
                hex::encode(key)
            }
        };

        let secret_bytes: [u8; 32] = hex::decode(&secret_hex)
            .map_err(|e| AttestationError::SigningError(format!("Invalid secret key hex: {e}")))?
            .try_into()
            .map_err(|_| AttestationError::SigningError("Secret key must be 32 bytes".into()))?;

        Ok(Self::new(&secret_bytes))
    }

    /// Get the server's public key
    pub fn public_key(&self) -> [u8; 32] {
        let verifying_key: VerifyingKey = self.signing_key.verifying_key();
        verifying_key.to_bytes()
    }

    /// Create an attestation for a prepared digest
    pub fn create_attestation(&self, digest: Digest) -> Attestation {
        let id = uuid::Uuid::new_v4().to_string();
        let timestamp = chrono::Utc::now().timestamp();

        let attestation_hash = Self::compute_attestation_hash(&id, &digest, timestamp);
        let signature = self.signing_key.sign(&attestation_hash);

        Attestation {
            id,
            digest,
            timestamp,
            attestation_hash,
            server_pubkey: self.public_key(),
            signature: signature.to_bytes(),
        }
    }

    /// Compute the attestation hash
    fn compute_attestation_hash(id: &str, digest: &Digest, timestamp: i64) -> [u8; 32] {
        let mut hasher = Sha256::new();

        // Domain separator
        hasher.update(b"content-authenticity:attestation:v1");

        hasher.update(id.as_bytes());
        hasher.update(digest.as_bytes());
        hasher.update(timestamp.to_le_bytes());

        hasher.finalize().into()
    }

    /// Verify an attestation signature and that the hash covers its fields
    pub fn verify_attestation(attestation: &Attestation) -> bool {
        use ed25519_dalek::{Signature, Verifier};

        let expected_hash =
            Self::compute_attestation_hash(&attestation.id, &attestation.digest, attestation.timestamp);
        if expected_hash != attestation.attestation_hash {
            return false;
        }

        let verifying_key = match VerifyingKey::from_bytes(&attestation.server_pubkey) {
            Ok(key) => key,
            Err(_) => return false,
        };

        let signature = Signature::from_bytes(&attestation.signature);

        verifying_key
            .verify(&attestation.attestation_hash, &signature)
            .is_ok()
    }
}
