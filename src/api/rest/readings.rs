//! Reading ingestion and retrieval endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::store::{SensorStore, StoreError};
use crate::types::{ReadingInput, Tier};

/// Response for a stored reading
#[derive(Debug, Serialize)]
pub struct StoreReadingResponse {
    pub accepted: bool,
    pub tier: Tier,
    #[serde(rename = "totalCount")]
    pub total_count: usize,
    pub timestamp: String,
}

/// POST /api/readings - Store one reading
pub async fn store_reading(
    State(store): State<Arc<SensorStore>>,
    Json(input): Json<ReadingInput>,
) -> impl IntoResponse {
    match store.record(input).await {
        Ok(receipt) => (
            StatusCode::OK,
            Json(StoreReadingResponse {
                accepted: true,
                tier: receipt.tier,
                total_count: receipt.total_count,
                timestamp: receipt.timestamp,
            }),
        )
            .into_response(),
        Err(StoreError::Validation(msg)) => {
            (StatusCode::BAD_REQUEST, Json(ApiError::bad_request(msg))).into_response()
        }
        // Backend-specific diagnostics stay in the logs.
        Err(StoreError::Exhausted) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::internal("internal storage error")),
        )
            .into_response(),
    }
}

/// Query parameters for retrieving readings
#[derive(Debug, Deserialize)]
pub struct GetReadingsParams {
    /// Return only the most recent `limit` readings.
    pub limit: Option<usize>,
}

/// GET /api/readings - Retrieve recent readings, newest last
pub async fn get_readings(
    State(store): State<Arc<SensorStore>>,
    Query(params): Query<GetReadingsParams>,
) -> impl IntoResponse {
    let result = store.query(params.limit).await;
    Json(result)
}
