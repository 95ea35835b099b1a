//! REST API module for HTTP endpoints
//!
//! Provides the ingestion and retrieval endpoints for sensor clients and
//! dashboards:
//! - `POST /api/readings` - Store one reading
//! - `GET /api/readings` - Retrieve recent readings
//! - `GET /health` - Service health and reading count

pub mod health;
pub mod readings;

use serde::Serialize;

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "BAD_REQUEST".to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "INTERNAL_ERROR".to_string(),
        }
    }
}
