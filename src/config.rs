//! Deployment configuration
//!
//! Everything is driven by environment variables with in-code defaults,
//! resolved once at startup. A remote tier is configured by giving it a URL;
//! leaving the URL unset means the deployment simply does not have that
//! tier, which is a supported mode, not an error.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Fast tier (KV) endpoint settings.
#[derive(Debug, Clone)]
pub struct FastStoreConfig {
    pub url: String,
    pub token: String,
    /// Key the reading log lives under.
    pub key: String,
}

/// Archive tier (versioned document) endpoint settings.
#[derive(Debug, Clone)]
pub struct ArchiveStoreConfig {
    pub url: String,
    pub token: String,
    /// Document the reading log lives in.
    pub doc: String,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub fast: Option<FastStoreConfig>,
    pub archive: Option<ArchiveStoreConfig>,
    /// Per-tier cap on stored readings; oldest are evicted beyond it.
    pub max_records: usize,
    /// Pending batch size that forces an archive commit.
    pub batch_size: usize,
    /// Elapsed time since the last commit that forces one on the next write.
    pub batch_interval: Duration,
    /// Bound on every remote backend call; a timeout counts as unavailable.
    pub backend_timeout: Duration,
    pub bind_addr: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            fast: None,
            archive: None,
            max_records: 1000,
            batch_size: 10,
            batch_interval: Duration::from_secs(300),
            backend_timeout: Duration::from_secs(10),
            bind_addr: "0.0.0.0:5000".to_string(),
        }
    }
}

impl StoreConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let fast = non_empty_var("FAST_STORE_URL").map(|url| FastStoreConfig {
            url,
            token: env::var("FAST_STORE_TOKEN").unwrap_or_default(),
            key: env::var("FAST_STORE_KEY").unwrap_or_else(|_| "bme680_readings".to_string()),
        });

        let archive = non_empty_var("ARCHIVE_STORE_URL").map(|url| ArchiveStoreConfig {
            url,
            token: env::var("ARCHIVE_STORE_TOKEN").unwrap_or_default(),
            doc: env::var("ARCHIVE_STORE_DOC").unwrap_or_else(|_| "sensor-data.json".to_string()),
        });

        Self {
            fast,
            archive,
            max_records: parsed_var("MAX_RECORDS", defaults.max_records),
            batch_size: parsed_var("BATCH_SIZE", defaults.batch_size),
            batch_interval: Duration::from_secs(parsed_var("BATCH_INTERVAL_SECS", 300)),
            backend_timeout: Duration::from_secs(parsed_var("BACKEND_TIMEOUT_SECS", 10)),
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parsed_var<T: FromStr + Copy>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}
