//! Witness preparation and audit endpoints

use axum::{extract::State, routing::post, Json, Router};
use tracing::{error, info, instrument};

use super::{ApiError, ApiJson};
use crate::state::AppState;
use crate::types::{PrepareWitnessRequest, PrepareWitnessResponse, VerifyWitnessRequest, VerifyWitnessResponse};

/// Create witness routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/witness/prepare", post(prepare_witness))
        .route("/witness/verify", post(verify_witness))
}

/// Prepare a final-round witness for content
/// POST /api/v1/witness/prepare
#[instrument(skip(state, request))]
async fn prepare_witness(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PrepareWitnessRequest>,
) -> Result<Json<PrepareWitnessResponse>, ApiError> {
    info!("Received witness preparation request");

    let content = state.witness().decode_content(&request.content_hex)?;
    let prepared = state.witness().prepare(&content).map_err(|e| {
        error!(error = %e, "Witness preparation failed");
        e
    })?;

    let attestation = state.attestation_signer().create_attestation(prepared.digest);
    state.increment_witnesses();

    let response = PrepareWitnessResponse {
        request_id: attestation.id.clone(),
        digest: prepared.digest,
        witness: prepared.witness,
        limbs: prepared.limbs,
        attestation,
        preparation_time_ms: prepared.preparation_time_ms,
    };

    info!(
        request_id = %response.request_id,
        digest = %response.digest,
        "Witness prepared successfully"
    );

    Ok(Json(response))
}

/// Audit a witness against a claimed digest
/// POST /api/v1/witness/verify
#[instrument(skip(state, request))]
async fn verify_witness(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<VerifyWitnessRequest>,
) -> Json<VerifyWitnessResponse> {
    info!(claimed = %request.claimed_digest, "Received witness verification request");

    match state.witness().audit(&request.witness, &request.claimed_digest) {
        Ok(()) => Json(VerifyWitnessResponse {
            valid: true,
            error: None,
        }),
        Err(e) => {
            error!(error = %e, "Witness verification failed");
            Json(VerifyWitnessResponse {
                valid: false,
                error: Some(e.to_string()),
            })
        }
    }
}
