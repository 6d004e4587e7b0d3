//! Provider configuration from TOML (`[providers.<id>]` sections)

use fanout_domain::{CredentialSet, ProviderSettings, builtin};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Overrides for one provider. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Set to `false` to drop the provider from the registry.
    pub enabled: bool,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    /// Replacement for scheme + host, e.g. a local proxy.
    pub base_url: Option<String>,
    /// Environment variable holding the API key.
    pub api_key_env: Option<String>,
    /// Direct API key (not recommended, prefer `api_key_env`).
    pub api_key: Option<String>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: None,
            max_tokens: None,
            base_url: None,
            api_key_env: None,
            api_key: None,
        }
    }
}

impl FileProviderConfig {
    /// Apply the overrides on top of a provider's default settings.
    pub fn apply_to(&self, mut settings: ProviderSettings) -> ProviderSettings {
        if let Some(model) = &self.model {
            settings.model = model.clone();
        }
        if let Some(max_tokens) = self.max_tokens {
            settings.max_tokens = max_tokens;
        }
        if let Some(base_url) = &self.base_url {
            settings.base_url = Some(base_url.clone());
        }
        settings
    }

    /// Name of the environment variable to read the key from.
    pub fn key_env<'a>(&'a self, id: &str) -> Option<&'a str> {
        self.api_key_env
            .as_deref()
            .or_else(|| builtin::default_api_key_env(id))
    }
}

/// Gather credentials for the built-in providers.
///
/// A non-empty `api_key` in the file wins over the environment. `lookup`
/// resolves environment variable names.
pub fn collect_credentials<F>(
    providers: &BTreeMap<String, FileProviderConfig>,
    mut lookup: F,
) -> CredentialSet
where
    F: FnMut(&str) -> Option<String>,
{
    let defaults = FileProviderConfig::default();
    let mut credentials = CredentialSet::new();
    for id in builtin::BUILTIN_IDS {
        let entry = providers.get(id).unwrap_or(&defaults);
        if !entry.enabled {
            continue;
        }
        let key = entry
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| entry.key_env(id).and_then(&mut lookup));
        if let Some(key) = key.filter(|k| !k.is_empty()) {
            credentials.set(id, key);
        }
    }
    credentials
}
