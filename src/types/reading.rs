//! Sensor reading types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::time::now_iso8601;

/// A single environmental reading as stored in every tier.
///
/// The three numeric fields are always present; anything else the sensor
/// reported (gas resistance, altitude, ...) rides along in `extra` untouched.
/// Readings are immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    /// ISO-8601, always present after ingestion.
    pub timestamp: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An incoming payload before validation and timestamp normalization.
///
/// Producers may omit the timestamp (the coordinator stamps server time) but
/// never the three numeric fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadingInput {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReadingInput {
    /// Validate required fields and convert into a stored [`Reading`],
    /// stamping the server's current time when the producer omitted one.
    ///
    /// The error lists the missing field names for the caller's 400 response.
    pub fn normalize(self) -> Result<Reading, String> {
        let mut missing = Vec::new();
        if self.temperature.is_none() {
            missing.push("temperature");
        }
        if self.humidity.is_none() {
            missing.push("humidity");
        }
        if self.pressure.is_none() {
            missing.push("pressure");
        }

        match (self.temperature, self.humidity, self.pressure) {
            (Some(temperature), Some(humidity), Some(pressure)) => Ok(Reading {
                temperature,
                humidity,
                pressure,
                timestamp: self.timestamp.unwrap_or_else(now_iso8601),
                extra: self.extra,
            }),
            _ => Err(format!(
                "missing required sensor fields: {}",
                missing.join(", ")
            )),
        }
    }
}
