//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod http;
mod output;
mod providers;
mod repl;

pub use http::FileHttpConfig;
pub use output::FileOutputConfig;
pub use providers::{FileProviderConfig, collect_credentials};
pub use repl::FileReplConfig;

use fanout_domain::{CredentialSet, ProviderRegistry, builtin};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The value cannot work; the caller should refuse to start.
    Error,
    /// The value is ignored or probably not what the user meant.
    Warning,
}

/// A detected problem in the loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending key, e.g. `providers.openai.max_tokens`
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.into(),
            message: message.into(),
        }
    }

    fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Per-provider overrides keyed by provider id
    pub providers: BTreeMap<String, FileProviderConfig>,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// HTTP client settings
    pub http: FileHttpConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (id, provider) in &self.providers {
            let prefix = format!("providers.{}", id);
            if !builtin::BUILTIN_IDS.contains(&id.as_str()) {
                issues.push(ConfigIssue::warning(
                    &prefix,
                    format!(
                        "unknown provider '{}' (known: {})",
                        id,
                        builtin::BUILTIN_IDS.join(", ")
                    ),
                ));
                continue;
            }
            if provider.max_tokens == Some(0) {
                issues.push(ConfigIssue::error(
                    format!("{}.max_tokens", prefix),
                    "max_tokens cannot be 0",
                ));
            }
            if provider.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
                issues.push(ConfigIssue::error(
                    format!("{}.model", prefix),
                    "model name cannot be empty",
                ));
            }
            if let Some(base_url) = provider
                .base_url
                .as_ref()
                .filter(|url| !(url.starts_with("http://") || url.starts_with("https://")))
            {
                issues.push(ConfigIssue::error(
                    format!("{}.base_url", prefix),
                    format!("base_url must start with http:// or https:// (got '{}')", base_url),
                ));
            }
            if provider.api_key.is_some() {
                issues.push(ConfigIssue::warning(
                    format!("{}.api_key", prefix),
                    "API key stored in a config file; prefer api_key_env",
                ));
            }
        }

        if self.http.timeout_seconds == Some(0) {
            issues.push(ConfigIssue::error(
                "http.timeout_seconds",
                "timeout_seconds cannot be 0",
            ));
        }

        issues
    }

    /// Built-in providers with file overrides applied, minus disabled ones.
    pub fn provider_registry(&self) -> ProviderRegistry {
        ProviderRegistry::builtin_with(|id| {
            let defaults = builtin::default_settings(id)?;
            match self.providers.get(id) {
                Some(entry) if !entry.enabled => None,
                Some(entry) => Some(entry.apply_to(defaults)),
                None => Some(defaults),
            }
        })
    }

    /// Credentials from the file and the process environment.
    pub fn credentials_from_env(&self) -> CredentialSet {
        self.credentials_with(|name| std::env::var(name).ok())
    }

    /// Credentials from the file, resolving env var names with `lookup`.
    pub fn credentials_with<F>(&self, lookup: F) -> CredentialSet
    where
        F: FnMut(&str) -> Option<String>,
    {
        collect_credentials(&self.providers, lookup)
    }
}
