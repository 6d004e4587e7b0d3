//! Generate-content style API (Google Gemini).

use crate::core::error::ProviderError;
use crate::core::question::Question;
use crate::core::string::truncate;
use crate::providers::descriptor::text_at;
use crate::providers::{ProviderDescriptor, ProviderId, ProviderRequest, ProviderSettings};
use serde_json::{Value, json};

const BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MAX_ERROR_BODY: usize = 2000;

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// `POST /v1beta/models/{model}:generateContent?key=...`
///
/// The credential travels in the query string; there is no auth header.
/// Error statuses keep the full response body, which is where Google puts
/// the useful part of the explanation.
#[derive(Debug, Clone)]
pub struct GeminiDescriptor {
    id: ProviderId,
    settings: ProviderSettings,
}

impl GeminiDescriptor {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            id: ProviderId::from(super::GOOGLE),
            settings,
        }
    }
}

impl ProviderDescriptor for GeminiDescriptor {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    fn display_name(&self) -> &str {
        "Google Gemini"
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_or(BASE_URL),
            self.settings.model
        )
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    fn build_request(&self, question: &Question, credential: &str) -> ProviderRequest {
        let safety_settings: Vec<Value> = SAFETY_CATEGORIES
            .iter()
            .map(|category| json!({"category": category, "threshold": "BLOCK_MEDIUM_AND_ABOVE"}))
            .collect();

        let body = json!({
            "contents": [{"parts": [{"text": question.content()}]}],
            "generationConfig": {
                "temperature": 0.7,
                "topK": 1,
                "topP": 1,
                "maxOutputTokens": self.settings.max_tokens,
            },
            "safetySettings": safety_settings,
        });
        ProviderRequest::post(self.endpoint(), body).with_query("key", credential)
    }

    fn extract_answer(&self, body: &Value) -> Result<String, ProviderError> {
        let has_candidates = body
            .get("candidates")
            .and_then(Value::as_array)
            .is_some_and(|c| !c.is_empty());
        if !has_candidates {
            return Err(ProviderError::empty_response(self.display_name()));
        }
        text_at(
            body,
            "/candidates/0/content/parts/0/text",
            "candidates[0].content.parts[0].text",
            self.display_name(),
        )
    }

    fn describe_status(&self, status: u16, body: &str) -> ProviderError {
        let detail = (!body.trim().is_empty()).then(|| truncate(body.trim(), MAX_ERROR_BODY));
        ProviderError::status(self.display_name(), status, detail)
    }
}
