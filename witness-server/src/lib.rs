// Library entry point for witness-server
// Exposes core modules for testing and external use

pub mod config;
pub mod routes;
pub mod services;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use services::attestation;
pub use services::witness;
