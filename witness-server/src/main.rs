//! # Content Authenticity - Witness Server
//!
//! Off-chain half of the split-round hashing protocol.
//!
//! ## Features
//!
//! - Prepare final-round witnesses for the `final-round-proof` circuit
//! - Server attestation of prepared digests with Ed25519 signatures
//! - Audit-mode verification of witnesses without a prover
//! - Limb packing for digests and curve points, packed counter updates
//!
//! ## Usage
//!
//! ```bash
//! WITNESS_SERVER_PORT=3000 cargo run -p witness-server
//!
//! # Structured logs
//! WITNESS_SERVER_JSON_LOGS=true cargo run -p witness-server
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /status` - Detailed server status
//! - `POST /api/v1/witness/prepare` - Split-hash content into a witness
//! - `POST /api/v1/witness/verify` - Replay the final round against a digest
//! - `POST /api/v1/codec/{digest,point}/{pack,unpack}` - Limb packing
//! - `POST /api/v1/counters/{query,increment,set}` - Counter bank operations

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use witness_server::config::{Config, ATTESTATION_KEY_ENV};
use witness_server::routes::create_routes;
use witness_server::services::{AttestationSigner, WitnessConfig};
use witness_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        max_content_bytes = config.max_content_bytes,
        "Starting Content Authenticity Witness Server"
    );

    // Initialize attestation signer
    if config.attestation_secret_key.is_none() {
        warn!("{ATTESTATION_KEY_ENV} not set, using an ephemeral signing key");
    }
    let attestation_signer = AttestationSigner::from_secret_hex(config.attestation_secret_key.as_deref())?;
    info!(
        pubkey = %hex::encode(attestation_signer.public_key()),
        "Attestation signer initialized"
    );

    // Create application state
    let state = AppState::new(
        WitnessConfig {
            max_content_bytes: config.max_content_bytes,
        },
        attestation_signer,
    );

    // Build router
    let app = create_routes(state)
        .layer(cors_layer(&config))
        .layer(RequestBodyLimitLayer::new(config.request_body_limit()))
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.socket_addr()?;
    info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build CORS layer from the configured origins
fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.allows_any_origin() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(origins)
}

/// Initialize logging based on configuration
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_ansi(true),
            )
            .init();
    }
}
