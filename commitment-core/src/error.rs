//! Error taxonomy for the commitment core.
//!
//! Every failure is local and fail-closed. Callers that need to map errors
//! onto a coarser classification (HTTP status codes, journal panics) use
//! [`CommitmentError::kind`].

use thiserror::Error;

use crate::digest::Digest;

/// Coarse classification of a [`CommitmentError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value is outside its declared bound.
    Validation,
    /// A recomputed value disagrees with a claimed one.
    Mismatch,
    /// A counter index is outside the bank.
    Range,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommitmentError {
    #[error("{name} limb must be below 2^{bits}, got {value}")]
    LimbOutOfRange {
        name: &'static str,
        bits: u32,
        value: String,
    },
    #[error("{name} coordinate must fit in 256 bits, got {value}")]
    CoordinateOutOfRange { name: &'static str, value: String },
    #[error("Counter value {value} exceeds maximum {max}")]
    CounterValueOutOfRange { value: u32, max: u32 },
    #[error("Counter {id} is saturated")]
    CounterSaturated { id: usize },
    #[error("Counter bank scalar must be below 2^{bits}")]
    ScalarOutOfRange { bits: u32 },
    #[error("Invalid digest: {0}")]
    InvalidDigest(String),
    #[error("Digest mismatch: expected {expected}, computed {actual}")]
    DigestMismatch { expected: Digest, actual: Digest },
    #[error("Limb re-split mismatch")]
    LimbMismatch,
    #[error("Counter id {id} out of range (0..{count})")]
    CounterIdOutOfRange { id: usize, count: usize },
}

impl CommitmentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommitmentError::LimbOutOfRange { .. }
            | CommitmentError::CoordinateOutOfRange { .. }
            | CommitmentError::CounterValueOutOfRange { .. }
            | CommitmentError::CounterSaturated { .. }
            | CommitmentError::ScalarOutOfRange { .. }
            | CommitmentError::InvalidDigest(_) => ErrorKind::Validation,
            CommitmentError::DigestMismatch { .. } | CommitmentError::LimbMismatch => ErrorKind::Mismatch,
            CommitmentError::CounterIdOutOfRange { .. } => ErrorKind::Range,
        }
    }
}
