//! Presentation layer for fanout
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplCommand};
pub use cli::commands::{Cli, KeyArg, OutputFormat};
pub use config::{OutputConfig, ReplConfig};
pub use output::{console::ConsoleFormatter, formatter::OutputFormatter};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
