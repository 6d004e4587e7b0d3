//! CLI command definitions

use clap::{Parser, ValueEnum};
use fanout_domain::ProviderId;
use std::path::PathBuf;

/// Output format for fan-out results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One panel per provider with its answer or error
    Panels,
    /// Successful answers only
    Answers,
    /// JSON output
    Json,
}

impl From<OutputFormat> for fanout_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Panels => Self::Panels,
            OutputFormat::Answers => Self::Answers,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// A `--key provider=VALUE` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyArg {
    pub provider: ProviderId,
    pub value: String,
}

/// Split `provider=VALUE` at the first `=`. The value is kept verbatim.
pub fn parse_key_arg(s: &str) -> Result<KeyArg, String> {
    let (provider, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected PROVIDER=KEY, got '{}'", s))?;
    let provider = provider.trim();
    if provider.is_empty() {
        return Err("provider id before '=' cannot be empty".to_string());
    }
    Ok(KeyArg {
        provider: ProviderId::from(provider),
        value: value.to_string(),
    })
}

/// CLI arguments for fanout
#[derive(Parser, Debug)]
#[command(name = "fanout")]
#[command(author, version, about = "Ask one question to many text-generation providers at once")]
#[command(long_about = r#"
fanout sends your question to every provider you have a key for, in
parallel, and shows each answer (or error) as soon as it arrives.

Keys are read from the environment (OPENAI_API_KEY, ANTHROPIC_API_KEY,
GEMINI_API_KEY, COHERE_API_KEY, MISTRAL_API_KEY), from the config file, or
from --key. Providers without a key are skipped.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./fanout.toml       Project-level config
3. ~/.config/fanout/config.toml   Global config

Example:
  fanout "What's the best way to handle errors in Rust?"
  fanout --key openai=sk-... --key cohere=... "Explain lifetimes"
  fanout -p anthropic -p google --output answers "Haiku about borrowing"
  fanout --chat
"#)]
pub struct Cli {
    /// The question to ask (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Provider key as PROVIDER=KEY (can be specified multiple times)
    #[arg(short, long = "key", value_name = "PROVIDER=KEY", value_parser = parse_key_arg)]
    pub keys: Vec<KeyArg>,

    /// Only use these providers (can be specified multiple times)
    #[arg(short, long = "provider", value_name = "ID")]
    pub providers: Vec<String>,

    /// Output format (defaults to the config file value, then panels)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// List known providers and whether a key is configured, then exit
    #[arg(long)]
    pub list_providers: bool,
}
