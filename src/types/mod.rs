//! Data types for the tiered reading store
//!
//! This module contains the core data structures used throughout the application.

mod reading;
mod report;
mod tier;

pub use reading::{Reading, ReadingInput};
pub use report::{QueryResult, WriteReceipt};
pub use tier::Tier;

/// Result type for top-level application wiring (startup, shutdown).
pub type AppResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;
