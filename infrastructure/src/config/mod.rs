//! Configuration file loading for fanout
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./fanout.toml` or `./.fanout.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/fanout/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileConfig, FileHttpConfig, FileOutputConfig, FileProviderConfig,
    FileReplConfig, Severity,
};
pub use loader::ConfigLoader;
