//! The uniform contract every provider implements.

use super::{ProviderId, ProviderRequest};
use crate::core::error::ProviderError;
use crate::core::question::Question;
use crate::core::string::truncate;
use serde_json::Value;

/// Longest error detail kept from a provider's error body.
const MAX_ERROR_DETAIL: usize = 500;

/// Wire-format strategy for one text-generation provider.
///
/// Implementations are immutable and shared read-only between submissions.
pub trait ProviderDescriptor: Send + Sync + std::fmt::Debug {
    /// Stable key used for credentials and outcome slots.
    fn id(&self) -> &ProviderId;

    /// Human readable label for panels and error messages.
    fn display_name(&self) -> &str;

    /// Endpoint the request is posted to, without credentials.
    fn endpoint(&self) -> String;

    /// Model the provider is asked to answer with.
    fn model(&self) -> &str;

    /// Build the provider-specific request for a question.
    fn build_request(&self, question: &Question, credential: &str) -> ProviderRequest;

    /// Pull the answer text out of a successful response body.
    fn extract_answer(&self, body: &Value) -> Result<String, ProviderError>;

    /// Map a non-success status (and its raw body) to an error.
    ///
    /// The default keeps the provider's own `error.message` when the body
    /// carries one.
    fn describe_status(&self, status: u16, body: &str) -> ProviderError {
        ProviderError::status(self.display_name(), status, api_error_message(body))
    }
}

/// Extract the human readable message from a JSON error body.
///
/// Understands `{"error": {"message": ..}}`, `{"error": ".."}` and
/// `{"message": ..}`.
pub fn api_error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    let message = json
        .pointer("/error/message")
        .or_else(|| json.get("error").filter(|e| e.is_string()))
        .or_else(|| json.get("message"))
        .and_then(Value::as_str)?;
    Some(truncate(message, MAX_ERROR_DETAIL))
}

/// Read a string at a JSON pointer, reporting `path` in the parse error.
pub(crate) fn text_at(
    body: &Value,
    pointer: &str,
    path: &str,
    provider: &str,
) -> Result<String, ProviderError> {
    body.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ProviderError::parse(provider, format!("missing `{}`", path)))
}
