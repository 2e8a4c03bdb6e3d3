//! Type definitions for the Witness Server
//!
//! This module contains all request/response types and error codes.
//! Large integers (limbs, coordinates, counter banks) travel as decimal strings.

use commitment_core::serde_helpers::decimal;
use commitment_core::{CounterBank, Digest, RoundWitness, NUM_COUNTERS};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Helper for serializing fixed-size byte arrays larger than 32 bytes
mod bytes64 {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(data: &[u8; 64], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        hex::encode(data).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 64], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("expected 64 bytes"))
    }
}

/// Error codes returned by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Invalid input data
    InvalidInput,
    /// Value outside its declared bound
    ValidationFailed,
    /// Recomputed digest disagrees with the claim
    DigestMismatch,
    /// Counter id outside the bank
    CounterOutOfRange,
    /// Content exceeds the configured limit
    ContentTooLarge,
}

// ==================== Witness Types ====================

/// Request to prepare a final-round witness
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareWitnessRequest {
    /// Content bytes, hex encoded
    pub content_hex: String,
}

/// Digest split into storage limbs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestLimbs {
    #[serde(with = "decimal")]
    pub high: BigUint,
    #[serde(with = "decimal")]
    pub low: BigUint,
}

/// Server attestation over a prepared digest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attestation {
    /// Unique attestation ID
    pub id: String,
    /// Digest being attested
    pub digest: Digest,
    /// Timestamp
    pub timestamp: i64,
    /// Attestation hash (signed by server)
    pub attestation_hash: [u8; 32],
    /// Server's public key
    pub server_pubkey: [u8; 32],
    /// Signature over attestation_hash (hex encoded for serialization)
    #[serde(with = "bytes64")]
    pub signature: [u8; 64],
}

/// Response from witness preparation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareWitnessResponse {
    /// Unique request ID (same as the attestation ID)
    pub request_id: String,
    /// Reference digest of the content
    pub digest: Digest,
    /// Private input for the final-round circuit
    pub witness: RoundWitness,
    /// Digest as storage limbs
    pub limbs: DigestLimbs,
    /// Server attestation
    pub attestation: Attestation,
    /// Preparation time in milliseconds
    pub preparation_time_ms: u64,
}

/// Request to audit a witness against a claimed digest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyWitnessRequest {
    pub witness: RoundWitness,
    pub claimed_digest: Digest,
}

/// Response from witness verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyWitnessResponse {
    /// Whether the witness reproduces the claimed digest
    pub valid: bool,
    /// Error message if invalid
    pub error: Option<String>,
}

// ==================== Codec Types ====================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestPayload {
    pub digest: Digest,
}

/// Affine point coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointCoordinates {
    #[serde(with = "decimal")]
    pub x: BigUint,
    #[serde(with = "decimal")]
    pub y: BigUint,
}

/// Point split into four storage limbs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointLimbs {
    #[serde(with = "decimal")]
    pub x_high: BigUint,
    #[serde(with = "decimal")]
    pub x_low: BigUint,
    #[serde(with = "decimal")]
    pub y_high: BigUint,
    #[serde(with = "decimal")]
    pub y_low: BigUint,
}

// ==================== Counter Types ====================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterQueryRequest {
    pub bank: CounterBank,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterQueryResponse {
    pub counters: [u32; NUM_COUNTERS],
    pub total: u32,
    pub max_index: usize,
    pub max_value: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterIncrementRequest {
    pub bank: CounterBank,
    pub id: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterSetRequest {
    pub bank: CounterBank,
    pub id: usize,
    pub value: u32,
}

/// Updated bank after a mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterUpdateResponse {
    pub bank: CounterBank,
    /// New value of the touched counter
    pub value: u32,
    /// Whether the touched counter is saturated
    pub full: bool,
}

// ==================== Service Types ====================

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional additional details
    pub details: Option<serde_json::Value>,
}

/// Server health status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Server status
    pub status: String,
    /// Server version
    pub version: String,
}

/// Server status with more details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server status
    pub status: String,
    /// Server version
    pub version: String,
    /// Server public key for attestations
    pub server_pubkey: [u8; 32],
    /// Largest content accepted by the prepare endpoint
    pub max_content_bytes: usize,
    /// Total witnesses prepared
    pub total_witnesses: u64,
    /// Uptime in seconds
    pub uptime_secs: u64,
}
