//! Enviro Store
//!
//! A tiered storage service for environmental sensor readings. Readings
//! stream in from BME680-class sensors over HTTP and are reconciled across
//! three heterogeneous backends: a low-latency key/value tier, a
//! rate-limited version-checked document tier, and a volatile in-process
//! tier of last resort.
//!
//! # Modules
//!
//! - `types`: Core data structures (Reading, Tier, receipts)
//! - `store`: The tiered storage core - ring buffer, backend adapters,
//!   commit scheduler, write/read coordinators, facade
//! - `api`: HTTP edge (Axum router, REST handlers, CORS)
//! - `config`: Environment-driven deployment configuration
//! - `utils`: Timestamp helpers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use enviro_store::api::http::create_router;
//! use enviro_store::{SensorStore, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = StoreConfig::from_env();
//!     let store = Arc::new(SensorStore::from_config(&config).unwrap());
//!     let app = create_router(store);
//!     let listener = tokio::net::TcpListener::bind(&config.bind_addr).await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod api;
pub mod config;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::StoreConfig;
pub use store::{SensorStore, StoreError};
pub use types::{AppResult, QueryResult, Reading, ReadingInput, Tier, WriteReceipt};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
