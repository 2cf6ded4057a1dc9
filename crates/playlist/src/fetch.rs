use std::time::Duration;

use tracing::debug;

use crate::PlaylistError;
use vodhub_core::types::Source;

/// Retrieves raw playlist text for one source.
///
/// A seam so the resolve cycle can be exercised without network access.
#[async_trait::async_trait]
pub trait PlaylistFetcher: Send + Sync {
    async fn fetch(&self, source: &Source) -> Result<String, PlaylistError>;
}

/// HTTP fetcher with a per-request deadline, so one hung source cannot stall
/// a whole resolve cycle. No retries; callers needing resilience add their
/// own around this.
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl PlaylistFetcher for HttpFetcher {
    async fn fetch(&self, source: &Source) -> Result<String, PlaylistError> {
        debug!(source = %source.name, url = %source.url, "fetching playlist");

        let resp = self
            .client
            .get(&source.url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| PlaylistError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(PlaylistError::Status(resp.status().as_u16()));
        }

        resp.text()
            .await
            .map_err(|e| PlaylistError::Network(e.to_string()))
    }
}
