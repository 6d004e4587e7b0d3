//! Generate-style API (Cohere).

use crate::core::error::ProviderError;
use crate::core::question::Question;
use crate::providers::descriptor::text_at;
use crate::providers::{ProviderDescriptor, ProviderId, ProviderRequest, ProviderSettings};
use serde_json::{Value, json};

const BASE_URL: &str = "https://api.cohere.ai";
const GENERATE_PATH: &str = "/v1/generate";

/// `POST /v1/generate` with bearer auth; prompt in, `generations[0].text` out.
#[derive(Debug, Clone)]
pub struct CohereDescriptor {
    id: ProviderId,
    settings: ProviderSettings,
}

impl CohereDescriptor {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            id: ProviderId::from(super::COHERE),
            settings,
        }
    }
}

impl ProviderDescriptor for CohereDescriptor {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    fn display_name(&self) -> &str {
        "Cohere"
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.settings.base_or(BASE_URL), GENERATE_PATH)
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    fn build_request(&self, question: &Question, credential: &str) -> ProviderRequest {
        let body = json!({
            "model": self.settings.model,
            "prompt": question.content(),
            "max_tokens": self.settings.max_tokens,
        });
        ProviderRequest::post(self.endpoint(), body).with_bearer(credential)
    }

    fn extract_answer(&self, body: &Value) -> Result<String, ProviderError> {
        text_at(body, "/generations/0/text", "generations[0].text", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_and_answer() {
        let d = CohereDescriptor::new(ProviderSettings::new("command", 300));
        let q = Question::try_new("Name a prime").unwrap();
        let req = d.build_request(&q, "co-key");

        assert_eq!(req.url, "https://api.cohere.ai/v1/generate");
        assert_eq!(req.header("Authorization"), Some("Bearer co-key"));
        assert_eq!(
            req.body,
            json!({"model": "command", "prompt": "Name a prime", "max_tokens": 300})
        );

        let body = json!({"id": "g1", "generations": [{"id": "a", "text": " 7"}]});
        assert_eq!(d.extract_answer(&body).unwrap(), " 7");
    }

    #[test]
    fn test_missing_generations() {
        let d = CohereDescriptor::new(ProviderSettings::new("command", 300));
        let err = d.extract_answer(&json!({"message": "oops"})).unwrap_err();
        assert_eq!(err, ProviderError::parse("Cohere", "missing `generations[0].text`"));
    }
}
