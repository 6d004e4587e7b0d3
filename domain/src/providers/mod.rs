//! Provider descriptors and the registry that orders them.
//!
//! Every supported text-generation API is described by one
//! [`ProviderDescriptor`]: how to build its request and how to read its
//! answer. The orchestrator only ever talks to this trait, so supporting a
//! new provider means registering a new descriptor and nothing else.

pub mod builtin;
pub mod descriptor;
pub mod registry;
pub mod request;

use serde::{Deserialize, Serialize};

pub use descriptor::{ProviderDescriptor, api_error_message};
pub use registry::ProviderRegistry;
pub use request::ProviderRequest;

/// Stable string key of a provider (e.g. `"openai"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ProviderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ProviderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&ProviderId> for ProviderId {
    fn from(id: &ProviderId) -> Self {
        id.clone()
    }
}

/// Tunable parameters shared by every built-in descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    /// Model name sent to the provider.
    pub model: String,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Override for scheme + host (e.g. a proxy); the API path is kept.
    pub base_url: Option<String>,
}

impl ProviderSettings {
    pub fn new(model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// The base URL to use, falling back to the provider's public host.
    pub(crate) fn base_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.base_url
            .as_deref()
            .unwrap_or(default)
            .trim_end_matches('/')
    }
}
