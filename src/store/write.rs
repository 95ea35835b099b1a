//! Tiered write coordinator
//!
//! One incoming reading walks the tier chain in priority order: the fast
//! tier is written through immediately, the archive tier receives the
//! reading via the commit scheduler, and the volatile tier catches whatever
//! the others could not. A write only reports failure for malformed input;
//! as long as the volatile tier stands, data is accepted somewhere.

use tracing::{debug, warn};

use super::backend::{BackendResult, TierBackend};
use super::ring::RingLog;
use super::{SensorStore, StoreError, StoreResult};
use crate::types::{Reading, ReadingInput, Tier, WriteReceipt};

/// Write one reading through the tier chain.
pub(super) async fn record(store: &SensorStore, input: ReadingInput) -> StoreResult<WriteReceipt> {
    let reading = input.normalize().map_err(StoreError::Validation)?;
    let timestamp = reading.timestamp.clone();

    // Fast tier: read-modify-write of the whole log. Failure falls through,
    // it never aborts the write.
    let mut fast_count = None;
    if let Some(fast) = &store.fast {
        match write_through(fast.as_ref(), &reading, store.max_records).await {
            Ok(len) => {
                debug!(tier = %fast.tier(), total = len, "reading stored");
                fast_count = Some(len);
            }
            Err(err) => {
                warn!(tier = %fast.tier(), error = %err, "tier write failed, falling through");
            }
        }
    }

    // Archive tier: queue for the next batched commit regardless of the fast
    // tier's outcome. Append, trigger evaluation, and flush share one lock
    // scope so concurrent writers cannot race the same batch.
    let mut archive_count = None;
    if let Some(archive) = &store.archive {
        let mut scheduler = store.scheduler.lock().await;
        scheduler.enqueue(reading.clone());
        if scheduler.should_flush() {
            match scheduler.flush(archive.as_ref(), store.max_records).await {
                Ok(committed) => {
                    debug!(tier = %archive.tier(), committed, "batch committed");
                }
                Err(err) => {
                    warn!(tier = %archive.tier(), error = %err, "flush failed, batch retained");
                }
            }
        }
        archive_count = Some(scheduler.projected_len(store.max_records));
    }

    let receipt = match (fast_count, archive_count) {
        (Some(total_count), _) => WriteReceipt {
            tier: Tier::Fast,
            total_count,
            timestamp,
        },
        (None, Some(total_count)) => WriteReceipt {
            tier: Tier::Archive,
            total_count,
            timestamp,
        },
        (None, None) => {
            let total_count = store.volatile.append(reading);
            WriteReceipt {
                tier: Tier::Volatile,
                total_count,
                timestamp,
            }
        }
    };

    Ok(receipt)
}

/// Fetch a tier's log, append through the ring buffer, write it back.
/// Returns the resulting log length.
async fn write_through(
    tier: &dyn TierBackend,
    reading: &Reading,
    max_records: usize,
) -> BackendResult<usize> {
    let snapshot = tier.fetch_all().await?;
    let mut log = RingLog::from_vec(snapshot.readings, max_records);
    log.append(reading.clone());
    let merged = log.to_vec();
    tier.replace_all(&merged, snapshot.version.as_ref()).await?;
    Ok(merged.len())
}
