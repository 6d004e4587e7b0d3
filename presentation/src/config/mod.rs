//! Presentation-level configuration
//!
//! Configuration for output formatting and REPL behavior.

use fanout_domain::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
        }
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Show progress indicators
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<String>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

impl ReplConfig {
    /// History file location, expanding a leading `~/`.
    ///
    /// Falls back to the platform data directory.
    pub fn history_path(&self) -> Option<PathBuf> {
        match self.history_file.as_deref() {
            Some(path) => match path.strip_prefix("~/") {
                Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
                None => Some(PathBuf::from(path)),
            },
            None => dirs::data_dir().map(|d| d.join("fanout").join("history.txt")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_history_path() {
        let config = ReplConfig {
            history_file: Some("/tmp/fanout-history".to_string()),
            ..ReplConfig::default()
        };
        assert_eq!(config.history_path(), Some(PathBuf::from("/tmp/fanout-history")));
    }

    #[test]
    fn test_home_relative_history_path() {
        let config = ReplConfig {
            history_file: Some("~/.fanout_history".to_string()),
            ..ReplConfig::default()
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.history_path(), Some(home.join(".fanout_history")));
        }
    }
}
