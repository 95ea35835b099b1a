//! Bounded ring buffer over the reading log
//!
//! Every tier stores its log through this buffer, so capacity is enforced
//! uniformly: appends evict from the head, never grow past capacity, and
//! never fail.

use std::collections::VecDeque;

use crate::types::Reading;

/// Fixed-capacity, oldest-evicting sequence of readings.
#[derive(Debug, Clone)]
pub struct RingLog {
    items: VecDeque<Reading>,
    capacity: usize,
}

impl RingLog {
    /// Create an empty log. Capacity is clamped to at least 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Build a log from an existing vector, evicting the oldest entries if
    /// the vector already exceeds capacity. Backends are not trusted to have
    /// respected the cap.
    pub fn from_vec(readings: Vec<Reading>, capacity: usize) -> Self {
        let mut log = Self::new(capacity);
        for reading in readings {
            log.append(reading);
        }
        log
    }

    /// Append to the tail, evicting from the head until the cap holds.
    pub fn append(&mut self, reading: Reading) {
        self.items.push_back(reading);
        while self.items.len() > self.capacity {
            self.items.pop_front();
        }
    }

    /// The last `min(limit, len)` readings in original order.
    pub fn tail(&self, limit: usize) -> Vec<Reading> {
        let skip = self.items.len().saturating_sub(limit);
        self.items.iter().skip(skip).cloned().collect()
    }

    /// The full log in original order.
    pub fn to_vec(&self) -> Vec<Reading> {
        self.items.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temperature: f64) -> Reading {
        Reading {
            temperature,
            humidity: 50.0,
            pressure: 1013.0,
            timestamp: format!("2024-05-01T12:00:{:02.0}Z", temperature),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_append_within_capacity() {
        let mut log = RingLog::new(3);
        log.append(reading(1.0));
        log.append(reading(2.0));

        assert_eq!(log.len(), 2);
        assert_eq!(log.to_vec()[0].temperature, 1.0);
    }

    #[test]
    fn test_append_evicts_oldest_first() {
        let mut log = RingLog::new(3);
        for t in 1..=5 {
            log.append(reading(t as f64));
        }

        assert_eq!(log.len(), 3);
        let temps: Vec<f64> = log.to_vec().iter().map(|r| r.temperature).collect();
        assert_eq!(temps, vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_from_vec_caps_oversized_input() {
        let readings: Vec<Reading> = (1..=10).map(|t| reading(t as f64)).collect();
        let log = RingLog::from_vec(readings, 4);

        assert_eq!(log.len(), 4);
        assert_eq!(log.to_vec()[0].temperature, 7.0);
    }

    #[test]
    fn test_tail_returns_most_recent_in_order() {
        let mut log = RingLog::new(10);
        for t in 1..=6 {
            log.append(reading(t as f64));
        }

        let temps: Vec<f64> = log.tail(2).iter().map(|r| r.temperature).collect();
        assert_eq!(temps, vec![5.0, 6.0]);
    }

    #[test]
    fn test_tail_larger_than_len_returns_all() {
        let mut log = RingLog::new(10);
        log.append(reading(1.0));

        assert_eq!(log.tail(100).len(), 1);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut log = RingLog::new(0);
        log.append(reading(1.0));
        log.append(reading(2.0));

        assert_eq!(log.len(), 1);
        assert_eq!(log.to_vec()[0].temperature, 2.0);
    }
}
