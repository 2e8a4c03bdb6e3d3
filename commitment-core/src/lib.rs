//! # Content Commitment Core
//!
//! Data transformations shared by the off-chain witness server and the
//! zkVM guest that checks content digests.
//!
//! ## Two-phase hashing
//! 1. **Prepare** (untrusted, outside the guest): [`hash_splitter::split_hash`]
//!    runs SHA-256 over the content but stops one round short on the last
//!    block, returning a [`RoundWitness`] plus a reference digest.
//! 2. **Verify** (inside the guest): [`final_round::verify_final_round`]
//!    replays the omitted round and the chaining step and compares the result
//!    with the public digest.
//!
//! ## Storage packing
//! - [`codec::LimbCodec`] / [`codec::PointCodec`] - 256-bit values as two
//!   128-bit limbs, curve points as four.
//! - [`counter_bank::CounterBank`] - 25 saturating 10-bit counters in a
//!   single scalar, accessed by full oblivious scans.

pub mod codec;
pub mod counter_bank;
pub mod digest;
pub mod error;
pub mod final_round;
pub mod hash_splitter;
pub mod serde_helpers;
pub mod sha256;

pub use codec::{LimbCodec, PointCodec, LIMB_BITS};
pub use counter_bank::{CounterBank, COUNTER_BITS, COUNTER_MAX, NUM_COUNTERS, SCAN_WINDOW_BITS};
pub use digest::Digest;
pub use error::{CommitmentError, ErrorKind};
pub use final_round::{replay_final_round, verify_final_round};
pub use hash_splitter::{split_hash, RoundWitness, SplitHash};
pub use sha256::CompressionState;
