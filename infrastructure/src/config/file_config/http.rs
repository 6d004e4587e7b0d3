//! HTTP client configuration from TOML (`[http]` section)

use crate::http::HttpOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHttpConfig {
    /// Whole-request timeout. Unset means requests may take as long as the
    /// provider needs.
    pub timeout_seconds: Option<u64>,
    /// Override for the `User-Agent` header
    pub user_agent: Option<String>,
}

impl FileHttpConfig {
    pub fn to_options(&self) -> HttpOptions {
        let defaults = HttpOptions::default();
        HttpOptions {
            timeout: self.timeout_seconds.map(Duration::from_secs),
            user_agent: self
                .user_agent
                .clone()
                .filter(|ua| !ua.trim().is_empty())
                .unwrap_or(defaults.user_agent),
        }
    }
}
