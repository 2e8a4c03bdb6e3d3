//! # Final Round Proof Circuit (RISC Zero Guest)
//!
//! Proves that private content hashes to a public SHA-256 digest while only
//! executing the last compression round inside the zkVM. The other 63 rounds
//! are computed by the witness server.
//!
//! ## Private Inputs (Witness)
//! - witness: RoundWitness - penultimate state, chaining state, W[63], K[63]
//!
//! ## Public Inputs
//! - claimed_digest: [u8; 32] - The digest being attested
//!
//! ## Public Outputs (Journal)
//! - digest: [u8; 32] - The verified digest
//! - high_limb: [u8; 16] - Upper 128 bits (LE), ready for a storage slot
//! - low_limb: [u8; 16] - Lower 128 bits (LE)
//!
//! ## Security
//! - A mismatching witness panics, so no receipt can exist for it
//! - Every lane addition wraps modulo 2^32 as in FIPS 180-4

use commitment_core::{verify_final_round, CommitmentError, Digest, LimbCodec, RoundWitness};
use risc0_zkvm::guest::env;
use serde::{Deserialize, Serialize};

/// Inputs read from the host, in order
#[derive(Serialize, Deserialize)]
struct FinalRoundInput {
    /// Private final-round witness
    witness: RoundWitness,
    /// Public digest claimed by the caller
    claimed_digest: Digest,
}

/// Public outputs from the circuit
#[derive(Debug, PartialEq, Eq)]
struct FinalRoundJournal {
    digest: [u8; 32],
    high_limb: [u8; 16],
    low_limb: [u8; 16],
}

fn main() {
    let input: FinalRoundInput = env::read();

    let journal = match build_journal(&input) {
        Ok(journal) => journal,
        Err(e) => panic!("final round check failed: {e}"),
    };

    // Journal format: [digest: 32, high_limb: 16, low_limb: 16] = 64 bytes
    env::commit(&journal.digest);
    env::commit(&journal.high_limb);
    env::commit(&journal.low_limb);
}

/// Replay the final round and lay out the journal
fn build_journal(input: &FinalRoundInput) -> Result<FinalRoundJournal, CommitmentError> {
    verify_final_round(&input.witness, &input.claimed_digest)?;

    let (high, low) = LimbCodec::from_digest(&input.claimed_digest).to_u128_limbs();
    Ok(FinalRoundJournal {
        digest: *input.claimed_digest.as_bytes(),
        high_limb: high.to_le_bytes(),
        low_limb: low.to_le_bytes(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use commitment_core::split_hash;

    #[test]
    fn test_valid_witness_produces_journal() {
        let split = split_hash(b"Hello, World!");
        let input = FinalRoundInput {
            witness: split.witness,
            claimed_digest: split.digest,
        };

        let journal = build_journal(&input).unwrap();
        assert_eq!(&journal.digest, split.digest.as_bytes());
        assert_eq!(u128::from_le_bytes(journal.high_limb), 0xdffd6021bb2bd5b0af676290809ec3a5);
        assert_eq!(u128::from_le_bytes(journal.low_limb), 0x3191dd81c7f70a4b28688a362182986f);
    }

    #[test]
    fn test_wrong_digest_rejected() {
        let split = split_hash(b"original");
        let input = FinalRoundInput {
            witness: split.witness,
            claimed_digest: split_hash(b"forged").digest,
        };
        assert!(build_journal(&input).is_err());
    }
}
