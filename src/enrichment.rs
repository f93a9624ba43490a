//! Client for the external song metadata service.

use crate::error::{LibraryError, Result};
use crate::models::SongInfo;

/// Thin wrapper around a reqwest client pinned to the configured base URL.
#[derive(Debug, Clone)]
pub struct EnrichmentClient {
    http: reqwest::Client,
    base_url: String,
}

impl EnrichmentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        EnrichmentClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Ask the external service for the release metadata of one group/song
    /// pair via `GET {base}/info?group=..&song=..`.
    ///
    /// One attempt, no retry. Network failures, non-success statuses (with
    /// status and body captured), and undecodable bodies all come back as
    /// errors; the caller decides whether that is fatal. The create path
    /// treats them as best-effort.
    pub async fn fetch_info(&self, group: &str, song: &str) -> Result<SongInfo> {
        let url = format!("{}/info", self.base_url);
        tracing::debug!(%group, %song, url = %url, "requesting enrichment");

        let response = self
            .http
            .get(&url)
            .query(&[("group", group), ("song", song)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "enrichment service refused: {body}");
            return Err(LibraryError::ExternalStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let info: SongInfo = serde_json::from_str(&body)?;
        tracing::debug!(%group, %song, "received enrichment data");
        Ok(info)
    }
}
