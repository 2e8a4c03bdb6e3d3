//! Application State
//!
//! Shared state for the witness server, accessible from all route handlers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::services::{AttestationSigner, WitnessConfig, WitnessService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Witness preparation service
    witness: WitnessService,
    /// Attestation signing service
    attestation_signer: AttestationSigner,
    /// Total witnesses prepared
    total_witnesses: AtomicU64,
    /// Server start time
    start_time: Instant,
}

impl AppState {
    /// Create a new application state
    pub fn new(witness_config: WitnessConfig, attestation_signer: AttestationSigner) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                witness: WitnessService::new(witness_config),
                attestation_signer,
                total_witnesses: AtomicU64::new(0),
                start_time: Instant::now(),
            }),
        }
    }

    /// Get the witness service
    pub fn witness(&self) -> &WitnessService {
        &self.inner.witness
    }

    /// Get the attestation signer
    pub fn attestation_signer(&self) -> &AttestationSigner {
        &self.inner.attestation_signer
    }

    /// Get total witnesses prepared
    pub fn total_witnesses_prepared(&self) -> u64 {
        self.inner.total_witnesses.load(Ordering::Relaxed)
    }

    /// Increment witness counter
    pub fn increment_witnesses(&self) {
        self.inner.total_witnesses.fetch_add(1, Ordering::Relaxed);
    }

    /// Get server uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.inner.start_time.elapsed().as_secs()
    }
}
