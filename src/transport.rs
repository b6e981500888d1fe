//! Network transport boundary for lookup requests.
//!
//! The resolver issues plain GET requests and consumes `(status, body,
//! headers)` triples; everything else about the HTTP stack lives behind the
//! [`Transport`] trait so tests can substitute a scripted transport.

use crate::error::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Response delivered by a transport fetch.
#[derive(Debug, Clone, Default)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Bytes,
    /// Response headers.
    pub headers: HashMap<String, String>,
}

impl FetchResponse {
    /// Build a response from a status and body, with no headers.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
            headers: HashMap::new(),
        }
    }

    /// True for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// True for a 404 status, the lookup service's "publisher unknown".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Asynchronous GET transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url`, returning the full response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be completed at all
    /// (connection failure, timeout). Non-success statuses are not errors;
    /// they are returned in the response for the caller to interpret.
    async fn fetch(&self, url: &str) -> Result<FetchResponse>;
}

/// reqwest-backed transport.
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport whose requests are bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to initialize.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        debug!(%url, "issuing lookup request");

        let response = tokio::time::timeout(self.timeout, self.client.get(url).send())
            .await
            .map_err(|_| Error::Transport(format!("request to {url} timed out")))?
            .map_err(|e| Error::Transport(format!("request to {url} failed: {e}")))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("failed to read body from {url}: {e}")))?;

        Ok(FetchResponse {
            status,
            body,
            headers,
        })
    }
}
