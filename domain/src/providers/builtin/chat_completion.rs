//! Chat-completion style APIs (OpenAI and compatible services).

use crate::core::error::ProviderError;
use crate::core::question::Question;
use crate::providers::descriptor::text_at;
use crate::providers::{ProviderDescriptor, ProviderId, ProviderRequest, ProviderSettings};
use serde_json::{Value, json};

const OPENAI_BASE_URL: &str = "https://api.openai.com";
const MISTRAL_BASE_URL: &str = "https://api.mistral.ai";
const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// `POST /v1/chat/completions` with bearer auth.
///
/// Request: `{model, messages: [{role, content}], max_tokens}`.
/// Answer: `choices[0].message.content`.
#[derive(Debug, Clone)]
pub struct ChatCompletionDescriptor {
    id: ProviderId,
    display_name: String,
    default_base_url: &'static str,
    settings: ProviderSettings,
}

impl ChatCompletionDescriptor {
    pub fn openai(settings: ProviderSettings) -> Self {
        Self {
            id: ProviderId::from(super::OPENAI),
            display_name: "OpenAI".to_string(),
            default_base_url: OPENAI_BASE_URL,
            settings,
        }
    }

    pub fn mistral(settings: ProviderSettings) -> Self {
        Self {
            id: ProviderId::from(super::MISTRAL),
            display_name: "Mistral".to_string(),
            default_base_url: MISTRAL_BASE_URL,
            settings,
        }
    }
}

impl ProviderDescriptor for ChatCompletionDescriptor {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.settings.base_or(self.default_base_url),
            CHAT_COMPLETIONS_PATH
        )
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    fn build_request(&self, question: &Question, credential: &str) -> ProviderRequest {
        let body = json!({
            "model": self.settings.model,
            "messages": [{"role": "user", "content": question.content()}],
            "max_tokens": self.settings.max_tokens,
        });
        ProviderRequest::post(self.endpoint(), body).with_bearer(credential)
    }

    fn extract_answer(&self, body: &Value) -> Result<String, ProviderError> {
        text_at(
            body,
            "/choices/0/message/content",
            "choices[0].message.content",
            &self.display_name,
        )
    }
}
