//! ArchiveStore - rate-limited, version-checked document tier
//!
//! The log is one JSON array document, replaced wholesale per commit. The
//! store's ETag is the version token: reads return it, writes send it back
//! via `If-Match`, and a stale token fails with a distinct conflict outcome
//! instead of overwriting a concurrent commit. Commits against this tier are
//! batched by the scheduler because the medium rate-limits writes.

use async_trait::async_trait;
use reqwest::header::{ETAG, IF_MATCH, IF_NONE_MATCH};
use reqwest::StatusCode;

use super::{BackendError, BackendResult, TierBackend, TierSnapshot, VersionToken};
use crate::types::{Reading, Tier};

pub struct ArchiveStore {
    client: reqwest::Client,
    base_url: String,
    token: String,
    doc: String,
}

impl ArchiveStore {
    pub fn new(client: reqwest::Client, base_url: String, token: String, doc: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            doc,
        }
    }

    fn doc_url(&self) -> String {
        format!("{}/{}", self.base_url, self.doc)
    }

    fn etag_token(response: &reqwest::Response) -> Option<VersionToken> {
        response
            .headers()
            .get(ETAG)
            .and_then(|value| value.to_str().ok())
            .map(|raw| VersionToken(raw.trim_matches('"').to_string()))
    }
}

#[async_trait]
impl TierBackend for ArchiveStore {
    async fn fetch_all(&self) -> BackendResult<TierSnapshot> {
        let response = self
            .client
            .get(self.doc_url())
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(format!("archive get: {}", e)))?;

        // A document that does not exist yet is an empty log with no token.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(TierSnapshot::default());
        }
        if !response.status().is_success() {
            return Err(BackendError::Unavailable(format!(
                "archive get: http {}",
                response.status()
            )));
        }

        let version = Self::etag_token(&response);
        let readings: Vec<Reading> = response
            .json()
            .await
            .map_err(|e| BackendError::Unavailable(format!("archive payload decode: {}", e)))?;

        Ok(TierSnapshot { readings, version })
    }

    async fn replace_all(
        &self,
        readings: &[Reading],
        expected: Option<&VersionToken>,
    ) -> BackendResult<Option<VersionToken>> {
        let mut request = self
            .client
            .put(self.doc_url())
            .bearer_auth(&self.token)
            .json(&readings);

        // If-Match pins the overwrite to the version we read; If-None-Match
        // guards first-time creation against a document that appeared since.
        request = match expected {
            Some(token) => request.header(IF_MATCH, format!("\"{}\"", token.0)),
            None => request.header(IF_NONE_MATCH, "*"),
        };

        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(format!("archive put: {}", e)))?;

        match response.status() {
            StatusCode::CONFLICT | StatusCode::PRECONDITION_FAILED => Err(BackendError::Conflict),
            status if status.is_success() => Ok(Self::etag_token(&response)),
            status => Err(BackendError::Unavailable(format!(
                "archive put: http {}",
                status
            ))),
        }
    }

    fn tier(&self) -> Tier {
        Tier::Archive
    }
}
