//! Manifest and file fetching over HTTP (reqwest) and from the local filesystem.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;

use crate::domain::{AppError, FetchConfig, Location};
use crate::ports::SourceFetcher;

/// Fetcher performing a single bounded-time request per call.
///
/// No retry: a bad URL should fail immediately rather than after repeated delays.
#[derive(Debug, Clone)]
pub struct HttpSourceFetcher {
    client: Client,
    timeout_secs: u64,
}

impl HttpSourceFetcher {
    /// Create a fetcher honoring the project's fetch settings.
    pub fn new(config: &FetchConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout_secs: config.timeout_secs })
    }

    fn fetch_remote(&self, url: &Url) -> Result<Vec<u8>, AppError> {
        tracing::debug!(%url, "fetching remote source");

        let response = self.client.get(url.clone()).send().map_err(|e| {
            let reason = if e.is_timeout() {
                format!("timed out after {}s", self.timeout_secs)
            } else {
                format!("request failed: {}", e)
            };
            AppError::fetch_error(url.as_str(), reason, None)
        })?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("unexpected HTTP status");
            return Err(AppError::fetch_error(url.as_str(), reason, Some(status.as_u16())));
        }

        let body = response.bytes().map_err(|e| {
            AppError::fetch_error(
                url.as_str(),
                format!("failed to read response body: {}", e),
                Some(status.as_u16()),
            )
        })?;

        tracing::debug!(%url, bytes = body.len(), "fetched remote source");
        Ok(body.to_vec())
    }

    fn fetch_local(&self, path: &Path) -> Result<Vec<u8>, AppError> {
        tracing::debug!(path = %path.display(), "reading local source");

        if path.is_dir() {
            return Err(AppError::fetch_error(path.display().to_string(), "is a directory", None));
        }

        fs::read(path).map_err(|e| {
            let reason = match e.kind() {
                ErrorKind::NotFound => "not found".to_string(),
                _ => e.to_string(),
            };
            AppError::fetch_error(path.display().to_string(), reason, None)
        })
    }
}

impl SourceFetcher for HttpSourceFetcher {
    fn fetch(&self, location: &Location) -> Result<Vec<u8>, AppError> {
        match location {
            Location::Remote(url) => self.fetch_remote(url),
            Location::Local(path) => self.fetch_local(path),
        }
    }
}
