//! Messages-style API (Anthropic).

use crate::core::error::ProviderError;
use crate::core::question::Question;
use crate::providers::descriptor::text_at;
use crate::providers::{ProviderDescriptor, ProviderId, ProviderRequest, ProviderSettings};
use serde_json::{Value, json};

const BASE_URL: &str = "https://api.anthropic.com";
const MESSAGES_PATH: &str = "/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// `POST /v1/messages` with `x-api-key` and `anthropic-version` headers.
#[derive(Debug, Clone)]
pub struct AnthropicDescriptor {
    id: ProviderId,
    settings: ProviderSettings,
}

impl AnthropicDescriptor {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            id: ProviderId::from(super::ANTHROPIC),
            settings,
        }
    }
}

impl ProviderDescriptor for AnthropicDescriptor {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    fn display_name(&self) -> &str {
        "Anthropic"
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.settings.base_or(BASE_URL), MESSAGES_PATH)
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    fn build_request(&self, question: &Question, credential: &str) -> ProviderRequest {
        let body = json!({
            "model": self.settings.model,
            "max_tokens": self.settings.max_tokens,
            "messages": [{"role": "user", "content": question.content()}],
        });
        ProviderRequest::post(self.endpoint(), body)
            .with_header("x-api-key", credential)
            .with_header("anthropic-version", API_VERSION)
    }

    fn extract_answer(&self, body: &Value) -> Result<String, ProviderError> {
        text_at(body, "/content/0/text", "content[0].text", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> AnthropicDescriptor {
        AnthropicDescriptor::new(ProviderSettings::new("claude-3-5-haiku-latest", 1024))
    }

    #[test]
    fn test_request_shape() {
        let q = Question::try_new("Hello?").unwrap();
        let req = descriptor().build_request(&q, "ak-test");

        assert_eq!(req.url, "https://api.anthropic.com/v1/messages");
        assert_eq!(req.header("x-api-key"), Some("ak-test"));
        assert_eq!(req.header("anthropic-version"), Some("2023-06-01"));
        assert!(req.header("authorization").is_none());
        assert_eq!(req.body["max_tokens"], 1024);
        assert_eq!(req.body["messages"][0]["role"], "user");
        assert_eq!(req.body["messages"][0]["content"], "Hello?");
    }

    #[test]
    fn test_extract_answer() {
        let body = json!({"content": [{"type": "text", "text": "Hi there"}]});
        assert_eq!(descriptor().extract_answer(&body).unwrap(), "Hi there");
    }

    #[test]
    fn test_extract_answer_empty_content() {
        let err = descriptor()
            .extract_answer(&json!({"content": []}))
            .unwrap_err();
        assert_eq!(
            err,
            ProviderError::parse("Anthropic", "missing `content[0].text`")
        );
    }

    #[test]
    fn test_describe_status_uses_error_message() {
        let body = r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#;
        let err = descriptor().describe_status(401, body);
        assert_eq!(
            err.to_string(),
            "Anthropic API error (HTTP 401): invalid x-api-key"
        );
    }
}
