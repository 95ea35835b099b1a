//! Health check endpoint

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;

use crate::store::SensorStore;
use crate::types::Tier;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Tier currently serving reads.
    pub tier: Tier,
    #[serde(rename = "totalReadings")]
    pub total_readings: usize,
}

/// GET /health - Service health and reading count
pub async fn health_check(State(store): State<Arc<SensorStore>>) -> impl IntoResponse {
    let result = store.query(None).await;
    Json(HealthResponse {
        status: "healthy",
        tier: result.tier,
        total_readings: result.count,
    })
}
