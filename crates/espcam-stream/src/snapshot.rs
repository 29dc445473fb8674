use crate::{StreamConfig, StreamError};
use std::path::Path;

/// Single-shot JPEG download from the camera's capture endpoint.
///
/// One request per call, no retries. The whole request is bounded by the
/// configured timeout.
#[derive(Debug, Clone)]
pub struct SnapshotFetcher {
    client: reqwest::Client,
    url: String,
}

impl SnapshotFetcher {
    pub fn new(config: &StreamConfig) -> Result<Self, StreamError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            client,
            url: config.capture_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the response body.
    ///
    /// # Errors
    ///
    /// `StreamError::Http` on transport failure or timeout, `StreamError::Status`
    /// on any non-2xx answer.
    pub async fn fetch(&self) -> Result<Vec<u8>, StreamError> {
        log::debug!("GET {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StreamError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        log::debug!("snapshot: {} bytes", body.len());
        Ok(body.to_vec())
    }

    /// Fetch the response body and write it unchanged to `path`.
    ///
    /// Nothing is written when the fetch fails.
    pub async fn fetch_to_file(&self, path: &Path) -> Result<Vec<u8>, StreamError> {
        let body = self.fetch().await?;
        tokio::fs::write(path, &body).await?;
        log::info!("saved {} bytes to {}", body.len(), path.display());
        Ok(body)
    }
}
