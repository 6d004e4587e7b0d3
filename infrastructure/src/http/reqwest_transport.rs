//! `reqwest`-backed transport.
//!
//! Requests go out exactly as the provider descriptor built them. No retry,
//! and no timeout unless one was configured explicitly. Error messages never
//! carry the request URL.

use async_trait::async_trait;
use fanout_application::{HttpResponse, HttpTransport, TransportError};
use fanout_domain::ProviderRequest;
use std::time::Duration;
use tracing::trace;

/// Default `User-Agent` header sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("fanout/", env!("CARGO_PKG_VERSION"));

/// Client options taken from the `[http]` config section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOptions {
    /// Whole-request timeout. `None` keeps the client default (no timeout).
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Sends provider requests over HTTPS.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_options(&HttpOptions::default())
    }

    pub fn with_options(options: &HttpOptions) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().user_agent(options.user_agent.as_str());
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::InvalidRequest(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &ProviderRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.post(request.url.as_str()).json(&request.body);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(map_send_error)?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.without_url().to_string()))?;
        trace!("HTTP {} with {} byte body", status, body.len());

        Ok(HttpResponse::new(status, body))
    }
}

fn map_send_error(err: reqwest::Error) -> TransportError {
    let err = err.without_url();
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_builder() {
        TransportError::InvalidRequest(err.to_string())
    } else {
        TransportError::Connection(err.to_string())
    }
}
