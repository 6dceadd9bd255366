//! Reqwest transport wrapper
//!
//! Builds the underlying HTTP client once (timeout, default headers) and
//! converts every send-side failure into a normalized [`ApiError`], so no
//! `reqwest::Error` escapes this module.

use std::time::Duration;

use folio_domain::constants::CONTENT_TYPE_JSON;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::error::ApiError;

/// Thin wrapper around a configured reqwest client
#[derive(Debug, Clone)]
pub struct Transport {
    client: ReqwestClient,
}

impl Transport {
    /// Start building a new transport.
    #[must_use]
    pub fn builder() -> TransportBuilder {
        TransportBuilder::default()
    }

    /// Convenience constructor with default configuration.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the underlying client cannot be built.
    pub fn new() -> Result<Self, ApiError> {
        Self::builder().build()
    }

    /// Create a request builder for the given method and absolute URL.
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Send the request, normalizing send-side failures.
    ///
    /// A response of any status is returned as `Ok`; status handling is the
    /// caller's concern.
    ///
    /// # Errors
    /// Returns a normalized `ApiError` when the request cannot be built or
    /// no response arrives.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = builder.build().map_err(|e| ApiError::Request(e.to_string()))?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => Err(normalize_send_error(&err)),
        }
    }
}

/// Builder for [`Transport`]
#[derive(Debug)]
pub struct TransportBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for TransportBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(30), user_agent: None }
    }
}

impl TransportBuilder {
    /// Process-wide request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Optional user agent header.
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the transport.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the reqwest client cannot be built.
    pub fn build(self) -> Result<Transport, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(CONTENT_TYPE_JSON));

        let mut builder =
            ReqwestClient::builder().timeout(self.timeout).default_headers(headers).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(Transport { client })
    }
}

/// Classify a reqwest send failure into the normalized taxonomy.
///
/// Timeouts and connection failures count as "sent but no response"; builder
/// and body errors mean the request never left the process.
fn normalize_send_error(err: &reqwest::Error) -> ApiError {
    if err.is_timeout() || err.is_connect() {
        return ApiError::Network(err.to_string());
    }
    if err.is_builder() || err.is_body() {
        return ApiError::Request(err.to_string());
    }
    ApiError::Network(err.to_string())
}
