//! Prepare phase of the split-round hash.
//!
//! Runs SHA-256 over arbitrary content outside the constrained environment,
//! stopping one round short on the final block. The resulting
//! [`RoundWitness`] is everything the guest needs to finish the hash with a
//! single round and the chaining step.

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use tracing::trace;

use crate::digest::Digest;
use crate::error::CommitmentError;
use crate::final_round::verify_final_round;
use crate::sha256::{self, CompressionState, FINAL_ROUND, K};

/// Minimal data needed to replay the omitted final round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundWitness {
    /// Working lanes after rounds 0..=62 of the last block
    pub penultimate_state: CompressionState,
    /// Chaining state entering the last block
    pub initial_state: CompressionState,
    /// Schedule word W[63] of the last block
    pub message_word: u32,
    /// Round constant K[63]
    pub round_constant: u32,
}

/// Output of [`split_hash`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitHash {
    pub witness: RoundWitness,
    /// Reference digest computed independently; never a proof input
    pub digest: Digest,
}

impl SplitHash {
    /// Out-of-environment parity check between the witness and the reference digest.
    pub fn check_parity(&self) -> Result<(), CommitmentError> {
        verify_final_round(&self.witness, &self.digest)
    }
}

/// Split-hash `data` into a final-round witness plus its reference digest.
pub fn split_hash(data: &[u8]) -> SplitHash {
    let blocks = sha256::pad_message(data);
    trace!(len = data.len(), blocks = blocks.len(), "splitting content hash");

    // Padding always yields at least one block
    let (last, leading) = match blocks.split_last() {
        Some(split) => split,
        None => unreachable!("padded message is never empty"),
    };

    let initial_state = leading
        .iter()
        .fold(CompressionState::initial(), |state, block| sha256::compress(&state, block));

    let schedule = sha256::message_schedule(last);
    let penultimate_state = sha256::run_rounds(&initial_state, &schedule, FINAL_ROUND);

    SplitHash {
        witness: RoundWitness {
            penultimate_state,
            initial_state,
            message_word: schedule[FINAL_ROUND],
            round_constant: K[FINAL_ROUND],
        },
        digest: reference_digest(data),
    }
}

/// SHA-256 of `data` via the `sha2` crate.
pub fn reference_digest(data: &[u8]) -> Digest {
    Digest::new(Sha256::digest(data).into())
}

/// Padded 64-byte blocks for `data`.
pub fn padded_blocks(data: &[u8]) -> Vec<[u8; sha256::BLOCK_LEN]> {
    sha256::pad_message(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_world_reference() {
        let split = split_hash(b"Hello, World!");
        assert_eq!(
            split.digest.to_hex(),
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
        split.check_parity().unwrap();
    }

    #[test]
    fn test_single_block_starts_from_iv() {
        let split = split_hash(b"");
        assert_eq!(split.witness.initial_state, CompressionState::initial());
        assert_eq!(split.witness.round_constant, 0xc67178f2);
        split.check_parity().unwrap();
    }

    #[test]
    fn test_multi_block_chains() {
        let data = [0x61u8; 200];
        let split = split_hash(&data);
        assert_ne!(split.witness.initial_state, CompressionState::initial());
        split.check_parity().unwrap();
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(split_hash(b"same bytes"), split_hash(b"same bytes"));
    }

    #[test]
    fn test_padded_blocks_helper() {
        assert_eq!(padded_blocks(&[0u8; 56]).len(), 2);
    }
}
