//! Results reported by the storage facade

use serde::Serialize;

use super::{Reading, Tier};

/// Outcome of a write: which tier accepted it and the resulting total count
/// from whichever tier is authoritative for counting.
#[derive(Debug, Clone, Serialize)]
pub struct WriteReceipt {
    pub tier: Tier,
    #[serde(rename = "totalCount")]
    pub total_count: usize,
    /// Timestamp the reading entered the tiers with (normalized).
    pub timestamp: String,
}

/// Outcome of a read: which tier satisfied it and the resolved log.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub tier: Tier,
    pub count: usize,
    pub readings: Vec<Reading>,
}
