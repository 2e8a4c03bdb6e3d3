//! Services for the Witness Server
//!
//! Contains the core business logic for witness preparation and attestation.

pub mod attestation;
pub mod witness;

pub use attestation::AttestationSigner;
pub use witness::{WitnessConfig, WitnessError, WitnessService};
