//! Blocking HTTP client abstraction.
//!
//! Both remote data sources (the soil-property REST service and the
//! soil-map archive host) go through the [`HttpClient`] trait so
//! tests can inject canned responses instead of hitting the network.
//!
//! Unlike a convenience client, `get` returns the response for *any*
//! HTTP status: the soil-property client needs to see 429 to drive
//! its retry loop, so status policy belongs to the caller.

use thiserror::Error;

/// Error type for HTTP transport failures.
///
/// Protocol-level failures (non-2xx statuses) are not errors at this
/// layer; they come back as an [`HttpResponse`].
#[derive(Debug, Error)]
pub enum HttpError {
    /// The underlying client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// The request could not be completed (DNS, connect, timeout,
    /// body read).
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
}

/// A completed HTTP exchange.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body bytes
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking HTTP GET, injectable for tests.
pub trait HttpClient {
    /// Perform a GET request, returning the response for any status.
    fn get(&self, url: &str) -> Result<HttpResponse, HttpError>;
}

/// Real client backed by `reqwest::blocking`.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Create a client with a 30-second timeout.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(30)
    }

    /// Create a client with a custom timeout in seconds.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, HttpError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        let response = self.client.get(url).send().map_err(|e| HttpError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| HttpError::Transport {
                url: url.to_string(),
                message: format!("failed to read response body: {e}"),
            })?;
        Ok(HttpResponse { status, body })
    }
}
