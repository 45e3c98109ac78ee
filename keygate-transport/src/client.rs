//! HTTP client wrapper.

use crate::error::{TransportError, TransportResult};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Transport configuration.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Wall-clock timeout applied to every request, in seconds.
    pub timeout_secs: u64,
    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("keygate/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// A completed HTTP exchange.
///
/// Any response from the server counts as transport success, including 4xx
/// and 5xx — interpreting the status and body is the caller's protocol
/// concern.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Returns true for 2xx status codes.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// JSON transport with a bounded timeout.
///
/// TLS certificate and hostname verification are reqwest defaults and are
/// never disabled here; an https URL with a bad certificate surfaces as a
/// request failure.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &TransportConfig) -> TransportResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(TransportError::ClientBuild)?;
        Ok(Self { client })
    }

    /// Creates a transport with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_defaults() -> TransportResult<Self> {
        Self::new(&TransportConfig::default())
    }

    /// POSTs a JSON body and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request does not complete within the timeout
    /// or the body cannot be read.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> TransportResult<HttpResponse> {
        let response = self
            .client
            .post(url)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(TransportError::Body)?;
        debug!(url, status, "POST completed");

        Ok(HttpResponse { status, body })
    }

    /// GETs a URL and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request does not complete within the timeout
    /// or the body cannot be read.
    pub async fn get(&self, url: &str) -> TransportResult<HttpResponse> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(TransportError::Body)?;
        debug!(url, status, "GET completed");

        Ok(HttpResponse { status, body })
    }
}
