//! Descriptors for the providers supported out of the box.
//!
//! Order of [`BUILTIN_IDS`] is the registry order shown to users.

mod anthropic;
mod chat_completion;
mod cohere;
mod gemini;

pub use anthropic::AnthropicDescriptor;
pub use chat_completion::ChatCompletionDescriptor;
pub use cohere::CohereDescriptor;
pub use gemini::GeminiDescriptor;

use super::{ProviderDescriptor, ProviderSettings};
use std::sync::Arc;

pub const OPENAI: &str = "openai";
pub const ANTHROPIC: &str = "anthropic";
pub const GOOGLE: &str = "google";
pub const COHERE: &str = "cohere";
pub const MISTRAL: &str = "mistral";

/// Built-in provider ids in registry order.
pub const BUILTIN_IDS: [&str; 5] = [OPENAI, ANTHROPIC, GOOGLE, COHERE, MISTRAL];

/// Shared default for generated tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Default settings for a built-in provider id.
pub fn default_settings(id: &str) -> Option<ProviderSettings> {
    let model = match id {
        OPENAI => "gpt-4o-mini",
        ANTHROPIC => "claude-3-5-haiku-latest",
        GOOGLE => "gemini-1.5-flash",
        COHERE => "command",
        MISTRAL => "mistral-small-latest",
        _ => return None,
    };
    Some(ProviderSettings::new(model, DEFAULT_MAX_TOKENS))
}

/// Environment variable conventionally holding a provider's key.
pub fn default_api_key_env(id: &str) -> Option<&'static str> {
    match id {
        OPENAI => Some("OPENAI_API_KEY"),
        ANTHROPIC => Some("ANTHROPIC_API_KEY"),
        GOOGLE => Some("GEMINI_API_KEY"),
        COHERE => Some("COHERE_API_KEY"),
        MISTRAL => Some("MISTRAL_API_KEY"),
        _ => None,
    }
}

/// Instantiate the built-in descriptor for `id` with the given settings.
pub fn create(id: &str, settings: ProviderSettings) -> Option<Arc<dyn ProviderDescriptor>> {
    let descriptor: Arc<dyn ProviderDescriptor> = match id {
        OPENAI => Arc::new(ChatCompletionDescriptor::openai(settings)),
        ANTHROPIC => Arc::new(AnthropicDescriptor::new(settings)),
        GOOGLE => Arc::new(GeminiDescriptor::new(settings)),
        COHERE => Arc::new(CohereDescriptor::new(settings)),
        MISTRAL => Arc::new(ChatCompletionDescriptor::mistral(settings)),
        _ => return None,
    };
    Some(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_has_defaults() {
        for id in BUILTIN_IDS {
            let settings = default_settings(id).unwrap();
            assert_eq!(settings.max_tokens, DEFAULT_MAX_TOKENS);
            assert!(default_api_key_env(id).is_some());
            let descriptor = create(id, settings).unwrap();
            assert_eq!(descriptor.id().as_str(), id);
        }
    }

    #[test]
    fn test_unknown_id() {
        assert!(default_settings("acme").is_none());
        assert!(create("acme", ProviderSettings::new("m", 1)).is_none());
    }
}
