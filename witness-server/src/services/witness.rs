//! Witness Preparation Service
//!
//! Runs the untrusted half of the split-round hash: 63 of 64 rounds of the
//! final block happen here, the last one inside the final-round circuit.
//! Also exposes an audit check that replays the final round natively.

use commitment_core::{split_hash, verify_final_round, CommitmentError, Digest, LimbCodec, RoundWitness};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::types::DigestLimbs;

#[derive(Error, Debug)]
pub enum WitnessError {
    #[error("Content is {len} bytes, limit is {max}")]
    ContentTooLarge { len: usize, max: usize },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Commitment(#[from] CommitmentError),
}

/// Output of the prepare phase
#[derive(Debug, Clone)]
pub struct PreparedWitness {
    pub digest: Digest,
    pub witness: RoundWitness,
    pub limbs: DigestLimbs,
    pub preparation_time_ms: u64,
}

/// Witness service configuration
#[derive(Debug, Clone)]
pub struct WitnessConfig {
    /// Largest content accepted, in bytes
    pub max_content_bytes: usize,
}

pub struct WitnessService {
    config: WitnessConfig,
}

impl WitnessService {
    pub fn new(config: WitnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WitnessConfig {
        &self.config
    }

    /// Decode hex content, enforcing the size limit before decoding
    pub fn decode_content(&self, content_hex: &str) -> Result<Vec<u8>, WitnessError> {
        let content_hex = content_hex.strip_prefix("0x").unwrap_or(content_hex);
        let len = content_hex.len() / 2;
        if len > self.config.max_content_bytes {
            return Err(WitnessError::ContentTooLarge {
                len,
                max: self.config.max_content_bytes,
            });
        }
        hex::decode(content_hex).map_err(|e| WitnessError::InvalidInput(format!("content_hex: {e}")))
    }

    /// Split-hash content and check the witness against the reference digest
    #[instrument(skip(self, content), fields(len = content.len()))]
    pub fn prepare(&self, content: &[u8]) -> Result<PreparedWitness, WitnessError> {
        if content.len() > self.config.max_content_bytes {
            return Err(WitnessError::ContentTooLarge {
                len: content.len(),
                max: self.config.max_content_bytes,
            });
        }

        let start = Instant::now();
        let split = split_hash(content);

        // Never hand out a witness the circuit would reject
        split.check_parity()?;

        let (high, low) = LimbCodec::from_digest(&split.digest).to_limbs();
        let preparation_time_ms = start.elapsed().as_millis() as u64;

        info!(digest = %split.digest, preparation_time_ms, "Witness prepared");

        Ok(PreparedWitness {
            digest: split.digest,
            witness: split.witness,
            limbs: DigestLimbs { high, low },
            preparation_time_ms,
        })
    }

    /// Audit-mode final round check (plain recompute and compare)
    pub fn audit(&self, witness: &RoundWitness, claimed: &Digest) -> Result<(), WitnessError> {
        verify_final_round(witness, claimed)?;
        debug!(digest = %claimed, "Witness audit passed");
        Ok(())
    }
}
