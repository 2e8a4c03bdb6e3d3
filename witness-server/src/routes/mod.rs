//! HTTP Routes for the Witness Server
//!
//! Provides REST API endpoints for witness preparation, audit verification,
//! limb packing and counter-bank updates.

pub mod codec;
pub mod counters;
pub mod health;
pub mod witness;

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use commitment_core::{CommitmentError, ErrorKind};
use serde_json::json;

use crate::services::WitnessError;
use crate::state::AppState;
use crate::types::{ErrorCode, ErrorResponse};

/// Create all routes
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .nest(
            "/api/v1",
            witness::routes()
                .merge(codec::routes())
                .merge(counters::routes()),
        )
        .with_state(state)
}

/// JSON body extractor whose rejections render as an [`ErrorResponse`]
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Error returned by handlers, rendered as an [`ErrorResponse`]
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                code,
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.body.details = Some(details);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<CommitmentError> for ApiError {
    fn from(err: CommitmentError) -> Self {
        let (status, code) = match err.kind() {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, ErrorCode::ValidationFailed),
            ErrorKind::Range => (StatusCode::BAD_REQUEST, ErrorCode::CounterOutOfRange),
            ErrorKind::Mismatch => (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::DigestMismatch),
        };
        let api_error = ApiError::new(status, code, err.to_string());

        match err {
            CommitmentError::DigestMismatch { expected, actual } => api_error.with_details(json!({
                "expected": expected.to_hex(),
                "actual": actual.to_hex(),
            })),
            _ => api_error,
        }
    }
}

/// Body parsing failures. Values rejected while deserializing (bank scalars,
/// digests, decimal limbs) are validation failures; malformed JSON is bad input.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let (status, code) = match &rejection {
            JsonRejection::JsonDataError(_) => (StatusCode::BAD_REQUEST, ErrorCode::ValidationFailed),
            _ if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                (StatusCode::PAYLOAD_TOO_LARGE, ErrorCode::ContentTooLarge)
            }
            _ => (StatusCode::BAD_REQUEST, ErrorCode::InvalidInput),
        };
        ApiError::new(status, code, rejection.body_text())
    }
}

impl From<WitnessError> for ApiError {
    fn from(err: WitnessError) -> Self {
        match err {
            WitnessError::ContentTooLarge { len, max } => {
                ApiError::new(StatusCode::PAYLOAD_TOO_LARGE, ErrorCode::ContentTooLarge, err.to_string())
                    .with_details(json!({ "len": len, "max": max }))
            }
            WitnessError::InvalidInput(message) => {
                ApiError::new(StatusCode::BAD_REQUEST, ErrorCode::InvalidInput, message)
            }
            WitnessError::Commitment(inner) => inner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commitment_core::Digest;

    #[test]
    fn test_commitment_error_status() {
        let err: ApiError = CommitmentError::CounterIdOutOfRange { id: 30, count: 25 }.into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body.code, ErrorCode::CounterOutOfRange);

        let err: ApiError = CommitmentError::LimbMismatch.into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.body.details.is_none());
    }

    #[test]
    fn test_digest_mismatch_details() {
        let expected = Digest::new([0xab; 32]);
        let actual = Digest::new([0x01; 32]);
        let err: ApiError = CommitmentError::DigestMismatch { expected, actual }.into();

        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.body.code, ErrorCode::DigestMismatch);
        let details = err.body.details.unwrap();
        assert_eq!(details["expected"], "ab".repeat(32));
        assert_eq!(details["actual"], "01".repeat(32));
    }

    #[test]
    fn test_witness_error_status() {
        let err: ApiError = WitnessError::ContentTooLarge { len: 10, max: 1 }.into();
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.body.code, ErrorCode::ContentTooLarge);
        assert_eq!(err.body.details.unwrap()["max"], 1);
    }
}
