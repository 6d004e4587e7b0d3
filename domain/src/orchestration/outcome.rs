//! Provider outcome value object

use crate::core::error::ProviderError;
use serde::{Deserialize, Serialize};

/// Result state of one provider within one submission.
///
/// The only legal transitions are `Pending -> Success` and
/// `Pending -> Failure`; a settled outcome never changes again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ProviderOutcome {
    Pending,
    Success(String),
    Failure(String),
}

impl ProviderOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Answer text, for successful outcomes.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success(text) => Some(text),
            _ => None,
        }
    }

    /// Error message, for failed outcomes.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure(message) => Some(message),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success(_) => "success",
            Self::Failure(_) => "failure",
        }
    }
}

impl From<Result<String, ProviderError>> for ProviderOutcome {
    fn from(result: Result<String, ProviderError>) -> Self {
        match result {
            Ok(text) => Self::Success(text),
            Err(e) => Self::Failure(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        let ok: ProviderOutcome = Ok::<_, ProviderError>("hi".to_string()).into();
        assert_eq!(ok, ProviderOutcome::Success("hi".to_string()));
        assert_eq!(ok.text(), Some("hi"));

        let err: ProviderOutcome = Err(ProviderError::status("OpenAI", 429, None)).into();
        assert_eq!(err.error(), Some("OpenAI API error (HTTP 429)"));
        assert!(err.is_settled());
        assert!(!err.is_success());
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_value(ProviderOutcome::Success("x".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({"state": "success", "value": "x"}));

        let pending = serde_json::to_value(ProviderOutcome::Pending).unwrap();
        assert_eq!(pending, serde_json::json!({"state": "pending"}));
    }
}
