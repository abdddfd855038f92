//! Network transport used by grid sources
//!
//! The pipeline suspends twice per tile: once in [`TileTransport::fetch`]
//! until the response head arrives, and once in [`TileResponse::body`] while
//! the body is read.

use crate::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Shared async HTTP client for tile fetching
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("vectorgrid/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .tcp_keepalive(Duration::from_secs(30))
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(16)
        .build()
        .expect("failed to build reqwest async client")
});

/// Credential mode of a request, as understood by browser fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Credentials {
    Omit,
    #[default]
    SameOrigin,
    Include,
}

/// Per-source request options, handed to the transport verbatim
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    pub credentials: Credentials,
    pub headers: BTreeMap<String, String>,
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn with_credentials() -> Self {
        Self {
            credentials: Credentials::Include,
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// A response whose head has arrived but whose body is still pending
#[async_trait]
pub trait TileResponse: Send {
    fn status(&self) -> u16;

    fn is_success(&self) -> bool {
        (200..300).contains(&self.status())
    }

    /// Reads the full body
    async fn body(self: Box<Self>) -> Result<Vec<u8>>;
}

/// Issues tile requests. One call per fetched tile, no retries.
#[async_trait]
pub trait TileTransport: Send + Sync {
    async fn fetch(&self, url: &str, options: &RequestOptions) -> Result<Box<dyn TileResponse>>;
}

/// Response held fully in memory, for custom transports and tests
#[derive(Debug, Clone, PartialEq)]
pub struct BufferedResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl BufferedResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }
}

#[async_trait]
impl TileResponse for BufferedResponse {
    fn status(&self) -> u16 {
        self.status
    }

    async fn body(self: Box<Self>) -> Result<Vec<u8>> {
        Ok(self.body)
    }
}

/// HTTP transport backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Transport on the shared, pooled client
    pub fn new() -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
        }
    }

    /// Transport on a caller-configured client (proxies, TLS roots, cookie store)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

struct HttpResponse(reqwest::Response);

#[async_trait]
impl TileResponse for HttpResponse {
    fn status(&self) -> u16 {
        self.0.status().as_u16()
    }

    async fn body(self: Box<Self>) -> Result<Vec<u8>> {
        Ok(self.0.bytes().await?.to_vec())
    }
}

#[async_trait]
impl TileTransport for HttpTransport {
    async fn fetch(&self, url: &str, options: &RequestOptions) -> Result<Box<dyn TileResponse>> {
        let mut request = self.client.get(url);
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }
        // Cookies are only attached when the client carries a cookie store.
        if options.credentials == Credentials::Include {
            log::trace!("credentials=include for {}", url);
        }

        let response = request.send().await?;
        Ok(Box::new(HttpResponse(response)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_buffered_response() {
        let response: Box<dyn TileResponse> = Box::new(BufferedResponse::new(404, "missing"));
        assert_eq!(response.status(), 404);
        assert!(!response.is_success());
        assert_eq!(response.body().await.unwrap(), b"missing".to_vec());
    }

    #[test]
    fn test_success_range() {
        assert!(BufferedResponse::new(200, "").is_success());
        assert!(BufferedResponse::new(204, "").is_success());
        assert!(!BufferedResponse::new(304, "").is_success());
        assert!(!BufferedResponse::new(500, "").is_success());
    }

    #[test]
    fn test_request_options_builder() {
        let options = RequestOptions::with_credentials().with_header("Authorization", "Bearer t");
        assert_eq!(options.credentials, Credentials::Include);
        assert_eq!(options.headers["Authorization"], "Bearer t");
        assert_eq!(RequestOptions::default().credentials, Credentials::SameOrigin);
    }
}
