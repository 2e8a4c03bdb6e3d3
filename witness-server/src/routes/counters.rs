//! Packed counter bank endpoints
//!
//! The bank is passed in and returned by value; persisting it is the
//! caller's job.

use axum::{routing::post, Json, Router};
use tracing::{debug, instrument};

use super::{ApiError, ApiJson};
use crate::state::AppState;
use crate::types::{
    CounterIncrementRequest, CounterQueryRequest, CounterQueryResponse, CounterSetRequest, CounterUpdateResponse,
};

/// Create counter routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/counters/query", post(query_counters))
        .route("/counters/increment", post(increment_counter))
        .route("/counters/set", post(set_counter))
}

/// POST /api/v1/counters/query
async fn query_counters(ApiJson(request): ApiJson<CounterQueryRequest>) -> Json<CounterQueryResponse> {
    let bank = request.bank;
    let (max_index, max_value) = bank.find_max();

    Json(CounterQueryResponse {
        counters: bank.counters(),
        total: bank.total_count(),
        max_index,
        max_value,
    })
}

/// POST /api/v1/counters/increment
#[instrument(skip_all)]
async fn increment_counter(ApiJson(request): ApiJson<CounterIncrementRequest>) -> Result<Json<CounterUpdateResponse>, ApiError> {
    let CounterIncrementRequest { mut bank, id } = request;

    let value = bank.increment_counter(id)?;
    let full = bank.is_full(id)?;
    debug!(id, value, full, "Counter incremented");

    Ok(Json(CounterUpdateResponse { bank, value, full }))
}

/// POST /api/v1/counters/set
#[instrument(skip_all)]
async fn set_counter(ApiJson(request): ApiJson<CounterSetRequest>) -> Result<Json<CounterUpdateResponse>, ApiError> {
    let CounterSetRequest { mut bank, id, value } = request;

    bank.set_counter(id, value)?;
    let full = bank.is_full(id)?;
    debug!(id, value, full, "Counter set");

    Ok(Json(CounterUpdateResponse { bank, value, full }))
}
