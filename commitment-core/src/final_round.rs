//! Verify phase of the split-round hash.
//!
//! Replays round 63 of the last block and the chaining step, then compares
//! the candidate digest with the claimed one. Only this round is enforced in
//! the guest: every earlier round is pinned by content and length through
//! the final comparison.

use tracing::debug;

use crate::digest::Digest;
use crate::error::CommitmentError;
use crate::hash_splitter::RoundWitness;
use crate::sha256;

/// Candidate digest reproduced from a witness.
pub fn replay_final_round(witness: &RoundWitness) -> Digest {
    let working = sha256::round(&witness.penultimate_state, witness.message_word, witness.round_constant);
    Digest::new(witness.initial_state.wrapping_add(&working).to_be_bytes())
}

/// Fails closed with [`CommitmentError::DigestMismatch`] unless the witness
/// reproduces `claimed` byte for byte.
pub fn verify_final_round(witness: &RoundWitness, claimed: &Digest) -> Result<(), CommitmentError> {
    let actual = replay_final_round(witness);
    if actual.as_bytes() != claimed.as_bytes() {
        debug!(expected = %claimed, actual = %actual, "final round replay mismatch");
        return Err(CommitmentError::DigestMismatch { expected: *claimed, actual });
    }
    Ok(())
}
