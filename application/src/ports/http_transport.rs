//! HTTP transport port
//!
//! Defines how the application layer reaches provider APIs. The only
//! wire-level dependency of the system; implementations live in the
//! infrastructure layer.

use async_trait::async_trait;
use fanout_domain::ProviderRequest;
use thiserror::Error;

/// Errors raised before a provider produced any HTTP status
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// Raw status and body of a provider response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a fully built provider request and returns the raw response.
///
/// Implementations must send the request exactly as given (URL, headers,
/// JSON body) and must not retry.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: &ProviderRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(199, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }
}
