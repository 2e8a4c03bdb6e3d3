//! SHA-256 compression primitives (FIPS 180-4) with round-level access.
//!
//! The `sha2` crate only exposes whole-block compression, so the split
//! protocol carries its own round function. All lane arithmetic is modulo
//! 2^32.

use serde::{Deserialize, Serialize};

pub const BLOCK_LEN: usize = 64;
pub const ROUNDS: usize = 64;
pub const FINAL_ROUND: usize = ROUNDS - 1;

/// Initial chaining state H(0).
pub const IV: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// Round constants K[0..64].
pub const K: [u32; ROUNDS] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

/// The eight working lanes `a..h` of the compression function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionState(pub [u32; 8]);

impl CompressionState {
    pub const fn initial() -> Self {
        Self(IV)
    }

    pub fn lanes(&self) -> &[u32; 8] {
        &self.0
    }

    /// Lane-wise wrapping addition (the chaining step).
    pub fn wrapping_add(&self, other: &CompressionState) -> CompressionState {
        let mut out = [0u32; 8];
        for (i, lane) in out.iter_mut().enumerate() {
            *lane = self.0[i].wrapping_add(other.0[i]);
        }
        CompressionState(out)
    }

    /// Big-endian serialization, 4 bytes per lane.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (chunk, lane) in out.chunks_exact_mut(4).zip(self.0.iter()) {
            chunk.copy_from_slice(&lane.to_be_bytes());
        }
        out
    }
}

impl Default for CompressionState {
    fn default() -> Self {
        Self::initial()
    }
}

#[inline]
pub fn ch(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (!x & z)
}

#[inline]
pub fn maj(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (x & z) ^ (y & z)
}

/// Σ0
#[inline]
pub fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

/// Σ1
#[inline]
pub fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

/// σ0
#[inline]
pub fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

/// σ1
#[inline]
pub fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

/// Expand a 64-byte block into the 64-word message schedule.
pub fn message_schedule(block: &[u8; BLOCK_LEN]) -> [u32; ROUNDS] {
    let mut w = [0u32; ROUNDS];
    for (i, chunk) in block.chunks_exact(4).enumerate() {
        w[i] = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    for t in 16..ROUNDS {
        w[t] = small_sigma1(w[t - 2])
            .wrapping_add(w[t - 7])
            .wrapping_add(small_sigma0(w[t - 15]))
            .wrapping_add(w[t - 16]);
    }
    w
}

/// One compression round over the working lanes.
pub fn round(state: &CompressionState, message_word: u32, round_constant: u32) -> CompressionState {
    let [a, b, c, d, e, f, g, h] = state.0;

    let t1 = h
        .wrapping_add(big_sigma1(e))
        .wrapping_add(ch(e, f, g))
        .wrapping_add(round_constant)
        .wrapping_add(message_word);
    let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));

    CompressionState([t1.wrapping_add(t2), a, b, c, d.wrapping_add(t1), e, f, g])
}

/// Run rounds `0..rounds` of the compression function starting from the
/// chaining state, without the final feed-forward addition.
pub fn run_rounds(chaining: &CompressionState, schedule: &[u32; ROUNDS], rounds: usize) -> CompressionState {
    schedule
        .iter()
        .zip(K.iter())
        .take(rounds)
        .fold(*chaining, |state, (&w, &k)| round(&state, w, k))
}

/// Full 64-round compression including the feed-forward.
pub fn compress(chaining: &CompressionState, block: &[u8; BLOCK_LEN]) -> CompressionState {
    let schedule = message_schedule(block);
    let working = run_rounds(chaining, &schedule, ROUNDS);
    chaining.wrapping_add(&working)
}

/// Merkle-Damgard padding: `0x80`, zeros, then the bit length as a 64-bit
/// big-endian trailer, split into 64-byte blocks.
pub fn pad_message(data: &[u8]) -> Vec<[u8; BLOCK_LEN]> {
    let bit_len = (data.len() as u64).wrapping_mul(8);

    let mut padded = Vec::with_capacity(data.len() + 1 + 8 + BLOCK_LEN);
    padded.extend_from_slice(data);
    padded.push(0x80);
    while padded.len() % BLOCK_LEN != BLOCK_LEN - 8 {
        padded.push(0);
    }
    padded.extend_from_slice(&bit_len.to_be_bytes());

    padded
        .chunks_exact(BLOCK_LEN)
        .map(|chunk| {
            let mut block = [0u8; BLOCK_LEN];
            block.copy_from_slice(chunk);
            block
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_hash(data: &[u8]) -> [u8; 32] {
        pad_message(data)
            .iter()
            .fold(CompressionState::initial(), |state, block| compress(&state, block))
            .to_be_bytes()
    }

    #[test]
    fn test_abc_vector() {
        assert_eq!(
            hex::encode(full_hash(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_empty_vector() {
        assert_eq!(
            hex::encode(full_hash(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_padding_block_counts() {
        assert_eq!(pad_message(b"").len(), 1);
        assert_eq!(pad_message(&[0u8; 55]).len(), 1);
        // 56 bytes leaves no room for the 0x80 byte plus the length trailer
        assert_eq!(pad_message(&[0u8; 56]).len(), 2);
        assert_eq!(pad_message(&[0u8; 64]).len(), 2);
        assert_eq!(pad_message(&[0u8; 119]).len(), 2);
        assert_eq!(pad_message(&[0u8; 120]).len(), 3);
    }

    #[test]
    fn test_padding_layout() {
        let blocks = pad_message(b"abc");
        let block = &blocks[0];
        assert_eq!(&block[..3], b"abc");
        assert_eq!(block[3], 0x80);
        assert!(block[4..56].iter().all(|&b| b == 0));
        assert_eq!(&block[56..], &24u64.to_be_bytes());
    }

    #[test]
    fn test_round_wraps() {
        let state = CompressionState([u32::MAX; 8]);
        // Must not panic under overflow checks
        let next = round(&state, u32::MAX, u32::MAX);
        assert_eq!(next.0[1], u32::MAX);
        let sum = state.wrapping_add(&state);
        assert_eq!(sum.0[0], u32::MAX - 1);
    }

    #[test]
    fn test_mixing_functions() {
        assert_eq!(ch(0xffff_ffff, 0x1234_5678, 0x9abc_def0), 0x1234_5678);
        assert_eq!(ch(0, 0x1234_5678, 0x9abc_def0), 0x9abc_def0);
        assert_eq!(maj(0xffff_0000, 0xff00_ff00, 0x0000_ffff), 0xff00_ff00);
    }
}
