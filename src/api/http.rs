//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::store::SensorStore;

use super::rest::{health, readings};

/// Create the Axum router with all endpoints
pub fn create_router(store: Arc<SensorStore>) -> Router {
    // CORS configuration - the dashboard is served from arbitrary origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Reading ingestion and retrieval
        .route(
            "/api/readings",
            get(readings::get_readings).post(readings::store_reading),
        )
        .layer(cors)
        .with_state(store)
}
