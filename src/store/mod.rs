//! Tiered storage core
//!
//! The engineering problem this module solves is not the sensor or the HTTP
//! surface - it is deciding, on every write and read, which of several
//! heterogeneous backends holds the authoritative reading log, and keeping
//! them reconciled without losing data to rate limits or races.
//!
//! Layout mirrors the chain of responsibility:
//! - `ring`: the bounded log every tier stores through
//! - `backend`: one adapter per storage medium
//! - `scheduler`: batching policy for the rate-limited archive tier
//! - `write` / `read`: the coordinators walking the tier chain
//! - [`SensorStore`]: the facade the HTTP edge talks to

pub mod backend;
pub mod ring;
pub mod scheduler;

mod read;
mod write;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::config::StoreConfig;
use crate::types::{AppResult, QueryResult, ReadingInput, WriteReceipt};
use backend::{ArchiveStore, FastStore, TierBackend, VolatileStore};
use scheduler::CommitScheduler;

/// Result type for facade operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced to callers of the facade
#[derive(Debug)]
pub enum StoreError {
    /// Malformed input, rejected before any tier is touched.
    Validation(String),
    /// Every tier in the fallback chain failed.
    Exhausted,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Validation(msg) => write!(f, "validation error: {}", msg),
            StoreError::Exhausted => write!(f, "all storage tiers failed"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Single entry point over the tier chain.
///
/// Owns the configured backend adapters, the always-present volatile tier,
/// and the commit scheduler state. Each request borrows this shared state;
/// nothing here is a process-wide global, so tests inject fake adapters
/// through [`SensorStore::with_backends`].
pub struct SensorStore {
    fast: Option<Arc<dyn TierBackend>>,
    archive: Option<Arc<dyn TierBackend>>,
    volatile: VolatileStore,
    /// Pending batch + commit clock; one lock scope serializes
    /// append-and-flush per process.
    scheduler: Mutex<CommitScheduler>,
    max_records: usize,
}

impl SensorStore {
    /// Wire up real adapters from deployment configuration. A tier without
    /// an endpoint configured is absent, not failing.
    pub fn from_config(config: &StoreConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.backend_timeout)
            .build()?;

        let fast = config.fast.as_ref().map(|c| {
            Arc::new(FastStore::new(
                client.clone(),
                c.url.clone(),
                c.token.clone(),
                c.key.clone(),
            )) as Arc<dyn TierBackend>
        });

        let archive = config.archive.as_ref().map(|c| {
            Arc::new(ArchiveStore::new(
                client.clone(),
                c.url.clone(),
                c.token.clone(),
                c.doc.clone(),
            )) as Arc<dyn TierBackend>
        });

        Ok(Self::with_backends(
            fast,
            archive,
            config.max_records,
            config.batch_size,
            config.batch_interval,
        ))
    }

    /// Assemble a store from explicit adapters. This is the constructor
    /// tests use to inject scripted tiers.
    pub fn with_backends(
        fast: Option<Arc<dyn TierBackend>>,
        archive: Option<Arc<dyn TierBackend>>,
        max_records: usize,
        batch_size: usize,
        batch_interval: Duration,
    ) -> Self {
        Self {
            fast,
            archive,
            volatile: VolatileStore::new(max_records),
            scheduler: Mutex::new(CommitScheduler::new(batch_size, batch_interval)),
            max_records,
        }
    }

    /// Accept one reading into the tier chain.
    pub async fn record(&self, input: ReadingInput) -> StoreResult<WriteReceipt> {
        write::record(self, input).await
    }

    /// Resolve the most recent readings across the tier chain.
    pub async fn query(&self, limit: Option<usize>) -> QueryResult {
        read::query(self, limit).await
    }

    pub fn max_records(&self) -> usize {
        self.max_records
    }
}
