//! Tiered read coordinator
//!
//! Reads walk the same chain as writes, short-circuiting on the first tier
//! with data: fast is freshest and authoritative, archive is the durable
//! fallback, volatile is whatever this process managed to hold on to. Tiers
//! are never merged field-by-field; the first non-empty log wins wholesale.

use tracing::{debug, warn};

use super::ring::RingLog;
use super::SensorStore;
use crate::types::{QueryResult, Reading, Tier};

/// Resolve a read across the tier chain.
pub(super) async fn query(store: &SensorStore, limit: Option<usize>) -> QueryResult {
    if let Some(fast) = &store.fast {
        match fast.fetch_all().await {
            // The archive tier is deliberately not consulted once the fast
            // tier satisfies the read: the extra round trip cannot change
            // the returned data.
            Ok(snapshot) if !snapshot.readings.is_empty() => {
                return resolve(Tier::Fast, snapshot.readings, limit, store.max_records);
            }
            Ok(_) => debug!(tier = %fast.tier(), "tier empty, falling through"),
            Err(err) => {
                warn!(tier = %fast.tier(), error = %err, "tier read failed, falling through");
            }
        }
    }

    if let Some(archive) = &store.archive {
        match archive.fetch_all().await {
            Ok(snapshot) if !snapshot.readings.is_empty() => {
                return resolve(Tier::Archive, snapshot.readings, limit, store.max_records);
            }
            Ok(_) => debug!(tier = %archive.tier(), "tier empty, falling through"),
            Err(err) => {
                warn!(tier = %archive.tier(), error = %err, "tier read failed, falling through");
            }
        }
    }

    resolve(
        Tier::Volatile,
        store.volatile.snapshot(),
        limit,
        store.max_records,
    )
}

/// Apply the cap and the caller's limit to the resolved log.
fn resolve(tier: Tier, readings: Vec<Reading>, limit: Option<usize>, max_records: usize) -> QueryResult {
    let log = RingLog::from_vec(readings, max_records);
    let readings = match limit {
        Some(n) if n > 0 => log.tail(n),
        _ => log.to_vec(),
    };
    QueryResult {
        tier,
        count: readings.len(),
        readings,
    }
}
