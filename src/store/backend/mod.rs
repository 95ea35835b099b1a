//! Backend adapters - one polymorphic capability per storage medium
//!
//! Every tier exposes the same two operations: fetch the whole log, replace
//! the whole log. None of the backing media offer a partial append, so the
//! coordinators do read-modify-write and the adapters stay thin.

mod archive;
mod fast;
mod volatile;

pub use archive::ArchiveStore;
pub use fast::FastStore;
pub use volatile::VolatileStore;

use async_trait::async_trait;

use crate::types::{Reading, Tier};

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors a backend adapter can surface to the coordinators
#[derive(Debug)]
pub enum BackendError {
    /// Config, transport, timeout, or payload decode failure. The caller
    /// must treat this as "tier unavailable", never as "empty data".
    Unavailable(String),
    /// The supplied version token no longer matches the stored document.
    Conflict,
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::Unavailable(reason) => write!(f, "backend unavailable: {}", reason),
            BackendError::Conflict => write!(f, "version conflict"),
        }
    }
}

impl std::error::Error for BackendError {}

/// Opaque optimistic-concurrency token.
///
/// Returned by version-checked tiers on read and required on write; a stale
/// token makes `replace_all` fail with [`BackendError::Conflict`] instead of
/// silently overwriting a concurrent commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionToken(pub String);

/// The reading log as one tier currently holds it.
#[derive(Debug, Clone, Default)]
pub struct TierSnapshot {
    pub readings: Vec<Reading>,
    /// Present only for tiers with conflict detection.
    pub version: Option<VersionToken>,
}

/// Common interface for all storage tiers.
#[async_trait]
pub trait TierBackend: Send + Sync {
    /// Fetch the stored log plus its version token, if the medium has one.
    ///
    /// A resource that does not exist yet is an empty snapshot, not an error.
    async fn fetch_all(&self) -> BackendResult<TierSnapshot>;

    /// Overwrite the stored log wholesale.
    ///
    /// `expected` carries the version token from the preceding fetch for
    /// tiers that check it; tiers without conflict detection ignore it.
    /// Returns the new token when the medium issues one.
    async fn replace_all(
        &self,
        readings: &[Reading],
        expected: Option<&VersionToken>,
    ) -> BackendResult<Option<VersionToken>>;

    /// Tier identity for logging and result reporting.
    fn tier(&self) -> Tier;
}
