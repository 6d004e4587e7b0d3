//! Domain error types

use thiserror::Error;

/// Everything that can go wrong with a single provider call.
///
/// Each variant is confined to the provider that produced it: the
/// orchestrator converts it into that provider's failure outcome and
/// never lets it reach sibling calls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// DNS failure, refused connection, transport-level timeout, etc.
    #[error("{provider} request failed: {message}")]
    Transport { provider: String, message: String },

    /// The provider answered with a non-success HTTP status.
    #[error("{} API error (HTTP {}){}", .provider, .status, format_detail(.detail))]
    Status {
        provider: String,
        status: u16,
        detail: Option<String>,
    },

    /// The body was readable but did not have the expected shape.
    #[error("Unexpected {provider} response: {detail}")]
    Parse { provider: String, detail: String },

    /// The provider returned a well-formed body with nothing to show.
    #[error("{provider} returned an empty response")]
    EmptyResponse { provider: String },

    /// The call aborted inside this process before producing a result.
    #[error("{provider} call aborted: {message}")]
    Internal { provider: String, message: String },
}

impl ProviderError {
    pub fn transport(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn status(provider: impl Into<String>, status: u16, detail: Option<String>) -> Self {
        Self::Status {
            provider: provider.into(),
            status,
            detail,
        }
    }

    pub fn parse(provider: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Parse {
            provider: provider.into(),
            detail: detail.into(),
        }
    }

    pub fn empty_response(provider: impl Into<String>) -> Self {
        Self::EmptyResponse {
            provider: provider.into(),
        }
    }

    pub fn internal(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Internal {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// HTTP status code, when the failure came from a non-2xx response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn format_detail(detail: &Option<String>) -> String {
    match detail {
        Some(d) if !d.trim().is_empty() => format!(": {}", d.trim()),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_includes_code_and_detail() {
        let error = ProviderError::status("OpenAI", 401, Some("Incorrect API key".to_string()));
        assert_eq!(
            error.to_string(),
            "OpenAI API error (HTTP 401): Incorrect API key"
        );
        assert_eq!(error.status_code(), Some(401));
    }

    #[test]
    fn test_status_error_without_detail() {
        let error = ProviderError::status("Cohere", 500, None);
        assert_eq!(error.to_string(), "Cohere API error (HTTP 500)");

        let blank = ProviderError::status("Cohere", 502, Some("   ".to_string()));
        assert_eq!(blank.to_string(), "Cohere API error (HTTP 502)");
    }

    #[test]
    fn test_parse_and_empty_messages_name_provider() {
        let parse = ProviderError::parse("Anthropic", "missing `content[0].text`");
        assert!(parse.to_string().contains("Anthropic"));
        assert!(parse.to_string().contains("content[0].text"));

        let empty = ProviderError::empty_response("Google Gemini");
        assert_eq!(empty.to_string(), "Google Gemini returned an empty response");
        assert_eq!(empty.status_code(), None);
    }

    #[test]
    fn test_internal_error_is_not_a_response_error() {
        let error = ProviderError::internal("Cohere", "provider handler panicked");
        assert_eq!(error.to_string(), "Cohere call aborted: provider handler panicked");
        assert!(!error.to_string().starts_with("Unexpected"));
        assert_eq!(error.status_code(), None);
    }
}
