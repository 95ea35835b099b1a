//! Time and timestamp utilities

use chrono::{SecondsFormat, Utc};

/// Current UTC time as an ISO-8601 string, e.g. `2024-05-01T12:00:00.000Z`.
///
/// This is the format producers use for the `timestamp` field, so readings
/// stamped by the server sort consistently with readings stamped by the
/// sensor client.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
