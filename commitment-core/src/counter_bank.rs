//! Twenty-five saturating 10-bit counters packed into one scalar.
//!
//! Slot `i` occupies bits `[10 * i, 10 * i + 10)`. Every access walks all
//! 25 slots and selects by index equality, so the work done never depends
//! on which counter is touched. This matches what the proving environment
//! can express and must be kept even though native code could index directly.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::CommitmentError;

pub const NUM_COUNTERS: usize = 25;
pub const COUNTER_BITS: usize = 10;
pub const COUNTER_MAX: u32 = (1 << COUNTER_BITS) - 1;
/// Scalar capacity scanned on every access. Fixed for wire compatibility.
pub const SCAN_WINDOW_BITS: usize = 254;

const WINDOW_BYTES: usize = SCAN_WINDOW_BITS.div_ceil(8);

type Bits = [bool; SCAN_WINDOW_BITS];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ScalarRepr", into = "ScalarRepr")]
pub struct CounterBank {
    value: BigUint,
}

#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct ScalarRepr(#[serde(with = "crate::serde_helpers::decimal")] BigUint);

impl TryFrom<ScalarRepr> for CounterBank {
    type Error = CommitmentError;

    fn try_from(repr: ScalarRepr) -> Result<Self, Self::Error> {
        CounterBank::from_scalar(repr.0)
    }
}

impl From<CounterBank> for ScalarRepr {
    fn from(bank: CounterBank) -> Self {
        ScalarRepr(bank.value)
    }
}

impl Default for CounterBank {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterBank {
    /// All counters at zero.
    pub fn new() -> Self {
        Self { value: BigUint::default() }
    }

    /// Wrap a stored scalar. Bits above the counter region are kept as-is.
    pub fn from_scalar(value: BigUint) -> Result<Self, CommitmentError> {
        if value.bits() > SCAN_WINDOW_BITS as u64 {
            return Err(CommitmentError::ScalarOutOfRange {
                bits: SCAN_WINDOW_BITS as u32,
            });
        }
        Ok(Self { value })
    }

    pub fn scalar(&self) -> &BigUint {
        &self.value
    }

    pub fn get_counter(&self, id: usize) -> Result<u32, CommitmentError> {
        check_id(id)?;
        Ok(select_window(&to_bits(&self.value), id))
    }

    /// Overwrite one counter, leaving every other bit of the scalar untouched.
    pub fn set_counter(&mut self, id: usize, new_value: u32) -> Result<(), CommitmentError> {
        check_id(id)?;
        if new_value > COUNTER_MAX {
            return Err(CommitmentError::CounterValueOutOfRange {
                value: new_value,
                max: COUNTER_MAX,
            });
        }

        let mut bits = to_bits(&self.value);
        for slot in 0..NUM_COUNTERS {
            let selected = slot == id;
            for bit in 0..COUNTER_BITS {
                let position = slot * COUNTER_BITS + bit;
                let replacement = (new_value >> bit) & 1 == 1;
                bits[position] = if selected { replacement } else { bits[position] };
            }
        }
        self.value = from_bits(&bits);
        trace!(id, value = new_value, "counter written");
        Ok(())
    }

    /// Increment one counter. Rejects at saturation instead of wrapping.
    pub fn increment_counter(&mut self, id: usize) -> Result<u32, CommitmentError> {
        let current = self.get_counter(id)?;
        if current >= COUNTER_MAX {
            return Err(CommitmentError::CounterSaturated { id });
        }
        self.set_counter(id, current + 1)?;
        Ok(current + 1)
    }

    pub fn is_full(&self, id: usize) -> Result<bool, CommitmentError> {
        Ok(self.get_counter(id)? == COUNTER_MAX)
    }

    pub fn total_count(&self) -> u32 {
        let bits = to_bits(&self.value);
        (0..NUM_COUNTERS).map(|slot| read_window(&bits, slot)).sum()
    }

    /// `(index, value)` of the largest counter; the lowest index wins ties.
    pub fn find_max(&self) -> (usize, u32) {
        let bits = to_bits(&self.value);
        let mut best = (0, read_window(&bits, 0));
        for slot in 1..NUM_COUNTERS {
            let value = read_window(&bits, slot);
            if value > best.1 {
                best = (slot, value);
            }
        }
        best
    }

    /// All 25 counters in slot order.
    pub fn counters(&self) -> [u32; NUM_COUNTERS] {
        let bits = to_bits(&self.value);
        let mut out = [0u32; NUM_COUNTERS];
        for (slot, counter) in out.iter_mut().enumerate() {
            *counter = read_window(&bits, slot);
        }
        out
    }
}

fn check_id(id: usize) -> Result<(), CommitmentError> {
    if id >= NUM_COUNTERS {
        return Err(CommitmentError::CounterIdOutOfRange {
            id,
            count: NUM_COUNTERS,
        });
    }
    Ok(())
}

/// Little-endian bit decomposition over the full scan window.
fn to_bits(value: &BigUint) -> Bits {
    let bytes = value.to_bytes_le();
    let mut bits = [false; SCAN_WINDOW_BITS];
    for (i, bit) in bits.iter_mut().enumerate() {
        *bit = bytes.get(i / 8).is_some_and(|byte| (byte >> (i % 8)) & 1 == 1);
    }
    bits
}

fn from_bits(bits: &Bits) -> BigUint {
    let mut bytes = [0u8; WINDOW_BYTES];
    for (i, &bit) in bits.iter().enumerate() {
        if bit {
            bytes[i / 8] |= 1 << (i % 8);
        }
    }
    BigUint::from_bytes_le(&bytes)
}

fn read_window(bits: &Bits, slot: usize) -> u32 {
    (0..COUNTER_BITS).fold(0u32, |acc, bit| acc | (u32::from(bits[slot * COUNTER_BITS + bit]) << bit))
}

/// Oblivious read: every slot is decoded, only the matching one contributes.
fn select_window(bits: &Bits, id: usize) -> u32 {
    (0..NUM_COUNTERS).fold(0u32, |acc, slot| {
        let selected = u32::from(slot == id);
        acc + selected * read_window(bits, slot)
    })
}
