//! Limb packing endpoints for digests and curve points

use axum::{routing::post, Json, Router};
use commitment_core::{LimbCodec, PointCodec};
use tracing::debug;

use super::{ApiError, ApiJson};
use crate::state::AppState;
use crate::types::{DigestLimbs, DigestPayload, PointCoordinates, PointLimbs};

/// Create codec routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/codec/digest/pack", post(pack_digest))
        .route("/codec/digest/unpack", post(unpack_digest))
        .route("/codec/point/pack", post(pack_point))
        .route("/codec/point/unpack", post(unpack_point))
}

/// POST /api/v1/codec/digest/pack
async fn pack_digest(ApiJson(request): ApiJson<DigestPayload>) -> Json<DigestLimbs> {
    let (high, low) = LimbCodec::from_digest(&request.digest).to_limbs();
    Json(DigestLimbs { high, low })
}

/// POST /api/v1/codec/digest/unpack
async fn unpack_digest(ApiJson(request): ApiJson<DigestLimbs>) -> Result<Json<DigestPayload>, ApiError> {
    let codec = LimbCodec::from_limbs(&request.high, &request.low)?;
    debug!(digest = %codec.digest(), "Digest unpacked");
    Ok(Json(DigestPayload { digest: codec.digest() }))
}

/// POST /api/v1/codec/point/pack
async fn pack_point(ApiJson(request): ApiJson<PointCoordinates>) -> Result<Json<PointLimbs>, ApiError> {
    let [x_high, x_low, y_high, y_low] = PointCodec::from_point(&request.x, &request.y)?.to_limbs();
    Ok(Json(PointLimbs {
        x_high,
        x_low,
        y_high,
        y_low,
    }))
}

/// POST /api/v1/codec/point/unpack
async fn unpack_point(ApiJson(request): ApiJson<PointLimbs>) -> Result<Json<PointCoordinates>, ApiError> {
    let codec = PointCodec::from_limbs([&request.x_high, &request.x_low, &request.y_high, &request.y_low])?;
    let (x, y) = codec.to_point();
    Ok(Json(PointCoordinates { x, y }))
}
