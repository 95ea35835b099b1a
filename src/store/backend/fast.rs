//! FastStore - low-latency key/value tier
//!
//! Speaks a REST KV protocol: `GET {base}/get/{key}` returns
//! `{"result": <json string | null>}` and `POST {base}/set/{key}` stores the
//! request body under the key. The whole reading log lives as one JSON array
//! under one key; a companion `{key}:last_updated` key tracks the last write.
//!
//! This medium has no conflict detection, so concurrent read-modify-write
//! cycles can lose an update. That race is an accepted limitation of the
//! tier; the archive tier is the durable record.

use async_trait::async_trait;
use serde::Deserialize;

use super::{BackendError, BackendResult, TierBackend, TierSnapshot, VersionToken};
use crate::types::{Reading, Tier};
use crate::utils::time::now_iso8601;

pub struct FastStore {
    client: reqwest::Client,
    base_url: String,
    token: String,
    key: String,
}

/// Wire shape of a KV `get` response.
#[derive(Debug, Deserialize)]
struct KvValue {
    result: Option<String>,
}

impl FastStore {
    pub fn new(client: reqwest::Client, base_url: String, token: String, key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            key,
        }
    }

    fn get_url(&self) -> String {
        format!("{}/get/{}", self.base_url, self.key)
    }

    fn set_url(&self, key: &str) -> String {
        format!("{}/set/{}", self.base_url, key)
    }

    fn last_updated_key(&self) -> String {
        format!("{}:last_updated", self.key)
    }

    async fn set_value(&self, key: &str, body: String) -> BackendResult<()> {
        let response = self
            .client
            .post(self.set_url(key))
            .bearer_auth(&self.token)
            .body(body)
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(format!("kv set: {}", e)))?;

        if !response.status().is_success() {
            return Err(BackendError::Unavailable(format!(
                "kv set: http {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl TierBackend for FastStore {
    async fn fetch_all(&self) -> BackendResult<TierSnapshot> {
        let response = self
            .client
            .get(self.get_url())
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(format!("kv get: {}", e)))?;

        if !response.status().is_success() {
            return Err(BackendError::Unavailable(format!(
                "kv get: http {}",
                response.status()
            )));
        }

        let value: KvValue = response
            .json()
            .await
            .map_err(|e| BackendError::Unavailable(format!("kv get body: {}", e)))?;

        // An unset key is an empty log, not a failure.
        let readings = match value.result {
            Some(raw) => serde_json::from_str::<Vec<Reading>>(&raw)
                .map_err(|e| BackendError::Unavailable(format!("kv payload decode: {}", e)))?,
            None => Vec::new(),
        };

        Ok(TierSnapshot {
            readings,
            version: None,
        })
    }

    async fn replace_all(
        &self,
        readings: &[Reading],
        _expected: Option<&VersionToken>,
    ) -> BackendResult<Option<VersionToken>> {
        let payload = serde_json::to_string(readings)
            .map_err(|e| BackendError::Unavailable(format!("kv payload encode: {}", e)))?;

        self.set_value(&self.key, payload).await?;

        let stamp = readings
            .last()
            .map(|r| r.timestamp.clone())
            .unwrap_or_else(now_iso8601);
        self.set_value(&self.last_updated_key(), stamp).await?;

        Ok(None)
    }

    fn tier(&self) -> Tier {
        Tier::Fast
    }
}
