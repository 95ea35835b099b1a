//! VolatileStore - process-local tier of last resort
//!
//! A bounded ring buffer behind a mutex. Never fails, costs no round trip,
//! and survives nothing: a restart loses whatever only this tier held.

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{BackendResult, TierBackend, TierSnapshot, VersionToken};
use crate::store::ring::RingLog;
use crate::types::{Reading, Tier};

pub struct VolatileStore {
    log: Mutex<RingLog>,
    capacity: usize,
}

impl VolatileStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            log: Mutex::new(RingLog::new(capacity)),
            capacity,
        }
    }

    /// Append one reading and return the resulting log length.
    pub fn append(&self, reading: Reading) -> usize {
        let mut log = self.log.lock();
        log.append(reading);
        log.len()
    }

    /// The current log in original order.
    pub fn snapshot(&self) -> Vec<Reading> {
        self.log.lock().to_vec()
    }

    pub fn len(&self) -> usize {
        self.log.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.lock().is_empty()
    }
}

#[async_trait]
impl TierBackend for VolatileStore {
    async fn fetch_all(&self) -> BackendResult<TierSnapshot> {
        Ok(TierSnapshot {
            readings: self.snapshot(),
            version: None,
        })
    }

    async fn replace_all(
        &self,
        readings: &[Reading],
        _expected: Option<&VersionToken>,
    ) -> BackendResult<Option<VersionToken>> {
        *self.log.lock() = RingLog::from_vec(readings.to_vec(), self.capacity);
        Ok(None)
    }

    fn tier(&self) -> Tier {
        Tier::Volatile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn reading(temperature: f64) -> Reading {
        Reading {
            temperature,
            humidity: 50.0,
            pressure: 1013.0,
            timestamp: "2024-05-01T12:00:00.000Z".to_string(),
            extra: Map::new(),
        }
    }

    #[test]
    fn test_append_respects_capacity() {
        let store = VolatileStore::new(2);
        store.append(reading(1.0));
        store.append(reading(2.0));
        let len = store.append(reading(3.0));

        assert_eq!(len, 2);
        let temps: Vec<f64> = store.snapshot().iter().map(|r| r.temperature).collect();
        assert_eq!(temps, vec![2.0, 3.0]);
    }

    #[tokio::test]
    async fn test_backend_round_trip_never_fails() {
        let store = VolatileStore::new(5);
        let readings = vec![reading(1.0), reading(2.0)];

        store.replace_all(&readings, None).await.unwrap();
        let snapshot = store.fetch_all().await.unwrap();

        assert_eq!(snapshot.readings.len(), 2);
        assert!(snapshot.version.is_none());
    }
}
