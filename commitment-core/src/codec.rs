//! Limb packing for 256-bit commitments.
//!
//! On-chain storage slots hold scalars below the field modulus, so a 256-bit
//! value is stored as two limbs of exactly [`LIMB_BITS`] bits, high limb
//! first. A curve point takes four limbs instead of six.
//!
//! Both codecs are immutable and validate themselves at construction.

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::digest::{Digest, DIGEST_LEN};
use crate::error::CommitmentError;

/// Bit width of a single limb. Fixed for wire compatibility.
pub const LIMB_BITS: u32 = 128;

const LIMB_BYTES: usize = (LIMB_BITS / 8) as usize;
const COORDINATE_BITS: u64 = 256;

/// Big-endian base-256 decode.
fn fold_be(bytes: &[u8]) -> BigUint {
    bytes
        .iter()
        .fold(BigUint::zero(), |acc, &byte| acc * 256u32 + BigUint::from(byte))
}

/// Left-pad the big-endian bytes of `value` into `out`. Caller guarantees the fit.
fn write_be(value: &BigUint, out: &mut [u8]) {
    if value.is_zero() {
        out.fill(0);
        return;
    }
    let bytes = value.to_bytes_be();
    let offset = out.len() - bytes.len();
    out[..offset].fill(0);
    out[offset..].copy_from_slice(&bytes);
}

fn check_limb(name: &'static str, value: &BigUint) -> Result<(), CommitmentError> {
    if value.bits() > u64::from(LIMB_BITS) {
        return Err(CommitmentError::LimbOutOfRange {
            name,
            bits: LIMB_BITS,
            value: value.to_str_radix(10),
        });
    }
    Ok(())
}

/// A 256-bit value viewed as `(high, low)` 128-bit limbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LimbCodec {
    bytes: Digest,
}

impl LimbCodec {
    /// Pack two limbs into 32 big-endian bytes.
    pub fn from_limbs(high: &BigUint, low: &BigUint) -> Result<Self, CommitmentError> {
        check_limb("high", high)?;
        check_limb("low", low)?;

        let mut bytes = [0u8; DIGEST_LEN];
        write_be(high, &mut bytes[..LIMB_BYTES]);
        write_be(low, &mut bytes[LIMB_BYTES..]);
        let codec = Self { bytes: Digest::new(bytes) };

        let (re_high, re_low) = codec.to_limbs();
        if &re_high != high || &re_low != low {
            return Err(CommitmentError::LimbMismatch);
        }
        Ok(codec)
    }

    pub fn from_u128_limbs(high: u128, low: u128) -> Self {
        let mut bytes = [0u8; DIGEST_LEN];
        bytes[..LIMB_BYTES].copy_from_slice(&high.to_be_bytes());
        bytes[LIMB_BYTES..].copy_from_slice(&low.to_be_bytes());
        Self { bytes: Digest::new(bytes) }
    }

    pub fn from_digest(digest: &Digest) -> Self {
        Self { bytes: *digest }
    }

    pub fn to_limbs(&self) -> (BigUint, BigUint) {
        let bytes = self.bytes.as_bytes();
        (fold_be(&bytes[..LIMB_BYTES]), fold_be(&bytes[LIMB_BYTES..]))
    }

    pub fn to_u128_limbs(&self) -> (u128, u128) {
        let bytes = self.bytes.as_bytes();
        let mut high = [0u8; LIMB_BYTES];
        let mut low = [0u8; LIMB_BYTES];
        high.copy_from_slice(&bytes[..LIMB_BYTES]);
        low.copy_from_slice(&bytes[LIMB_BYTES..]);
        (u128::from_be_bytes(high), u128::from_be_bytes(low))
    }

    /// The full 256-bit value.
    pub fn to_value(&self) -> BigUint {
        fold_be(self.bytes.as_bytes())
    }

    pub fn digest(&self) -> Digest {
        self.bytes
    }

    fn from_value(name: &'static str, value: &BigUint) -> Result<Self, CommitmentError> {
        if value.bits() > COORDINATE_BITS {
            return Err(CommitmentError::CoordinateOutOfRange {
                name,
                value: value.to_str_radix(10),
            });
        }
        let mut bytes = [0u8; DIGEST_LEN];
        write_be(value, &mut bytes);
        Ok(Self { bytes: Digest::new(bytes) })
    }
}

/// An affine curve point `(x, y)` as four 128-bit limbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointCodec {
    x: LimbCodec,
    y: LimbCodec,
}

impl PointCodec {
    pub fn from_point(x: &BigUint, y: &BigUint) -> Result<Self, CommitmentError> {
        Ok(Self {
            x: LimbCodec::from_value("x", x)?,
            y: LimbCodec::from_value("y", y)?,
        })
    }

    /// Limbs in storage order `[x_high, x_low, y_high, y_low]`.
    pub fn from_limbs(limbs: [&BigUint; 4]) -> Result<Self, CommitmentError> {
        let [x_high, x_low, y_high, y_low] = limbs;
        Ok(Self {
            x: LimbCodec::from_limbs(x_high, x_low)?,
            y: LimbCodec::from_limbs(y_high, y_low)?,
        })
    }

    pub fn to_point(&self) -> (BigUint, BigUint) {
        (self.x.to_value(), self.y.to_value())
    }

    pub fn to_limbs(&self) -> [BigUint; 4] {
        let (x_high, x_low) = self.x.to_limbs();
        let (y_high, y_low) = self.y.to_limbs();
        [x_high, x_low, y_high, y_low]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    fn two_pow(bits: u32) -> BigUint {
        BigUint::one() << bits
    }

    #[test]
    fn test_limb_boundary() {
        let max = two_pow(128) - 1u32;
        let codec = LimbCodec::from_limbs(&max, &max).unwrap();
        assert_eq!(codec.digest().to_hex(), "ff".repeat(32));
        assert_eq!(codec.to_limbs(), (max.clone(), max));

        let err = LimbCodec::from_limbs(&two_pow(128), &BigUint::zero()).unwrap_err();
        assert!(matches!(err, CommitmentError::LimbOutOfRange { name: "high", .. }));

        let err = LimbCodec::from_limbs(&BigUint::zero(), &two_pow(128)).unwrap_err();
        assert!(matches!(err, CommitmentError::LimbOutOfRange { name: "low", .. }));
    }

    #[test]
    fn test_digest_split_is_big_endian() {
        let digest = Digest::from_hex("dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f").unwrap();
        let codec = LimbCodec::from_digest(&digest);
        let (high, low) = codec.to_u128_limbs();
        assert_eq!(high, 0xdffd6021bb2bd5b0af676290809ec3a5);
        assert_eq!(low, 0x3191dd81c7f70a4b28688a362182986f);

        let (big_high, big_low) = codec.to_limbs();
        assert_eq!(big_high, BigUint::from(high));
        assert_eq!(big_low, BigUint::from(low));
        assert_eq!(LimbCodec::from_limbs(&big_high, &big_low).unwrap().digest(), digest);
    }

    #[test]
    fn test_u128_constructor_matches_checked() {
        let checked = LimbCodec::from_limbs(&BigUint::from(7u8), &BigUint::from(9u8)).unwrap();
        assert_eq!(LimbCodec::from_u128_limbs(7, 9), checked);
    }

    #[test]
    fn test_zero_limbs() {
        let codec = LimbCodec::from_limbs(&BigUint::zero(), &BigUint::zero()).unwrap();
        assert_eq!(codec.digest(), Digest::new([0u8; 32]));
    }

    #[test]
    fn test_point_roundtrip_and_limbs() {
        let x = two_pow(255) + 12345u32;
        let y = BigUint::from(42u8);
        let codec = PointCodec::from_point(&x, &y).unwrap();
        assert_eq!(codec.to_point(), (x.clone(), y.clone()));

        let limbs = codec.to_limbs();
        assert_eq!(limbs[0], two_pow(127));
        assert_eq!(limbs[1], BigUint::from(12345u32));
        assert_eq!(limbs[2], BigUint::zero());
        assert_eq!(limbs[3], BigUint::from(42u8));

        let rebuilt = PointCodec::from_limbs([&limbs[0], &limbs[1], &limbs[2], &limbs[3]]).unwrap();
        assert_eq!(rebuilt, codec);
    }

    #[test]
    fn test_point_rejects_oversized_coordinate() {
        let err = PointCodec::from_point(&BigUint::one(), &two_pow(256)).unwrap_err();
        assert!(matches!(err, CommitmentError::CoordinateOutOfRange { name: "y", .. }));
    }
}
