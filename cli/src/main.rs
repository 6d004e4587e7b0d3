//! CLI entrypoint for fanout
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use fanout_application::{FanOutSession, FanOutUseCase, NoProgress, OutcomeObserver};
use fanout_domain::{CredentialSet, OutputFormat, ProviderRegistry};
use fanout_infrastructure::{ConfigLoader, FileConfig, ReqwestTransport, Severity};
use fanout_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputConfig, OutputFormatter, ProgressReporter, ReplConfig,
    SimpleProgress,
};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = load_config(&cli)?;
    let output = OutputConfig {
        format: cli.output.map(Into::into).or(config.output.format).unwrap_or_default(),
        color: config.output.color,
    };
    ConsoleFormatter::configure_color(output.color);

    let registry = build_registry(&cli, &config)?;
    let credentials = build_credentials(&cli, &config, &registry);

    if cli.list_providers {
        print_providers(&registry, &credentials);
        return Ok(());
    }

    info!("Starting fanout with {} provider(s)", registry.len());

    let transport = ReqwestTransport::with_options(&config.http.to_options())
        .context("Failed to create HTTP client")?;
    let use_case = FanOutUseCase::new(Arc::new(registry), Arc::new(transport));
    let session = Arc::new(FanOutSession::new(use_case, credentials));

    if cli.chat {
        let repl_config = ReplConfig {
            show_progress: config.repl.show_progress,
            history_file: config.repl.history_file.clone(),
        };
        let repl = ChatRepl::new(session)
            .with_progress(repl_config.show_progress && !cli.quiet)
            .with_format(output.format)
            .with_history(repl_config.history_path());
        repl.run().await?;
        return Ok(());
    }

    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required. Use --chat for interactive mode."),
    };

    let observer: Arc<dyn OutcomeObserver> = if cli.quiet || output.format == OutputFormat::Json {
        Arc::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Arc::new(ProgressReporter::new())
    } else {
        Arc::new(SimpleProgress::new())
    };

    let result = session.ask(question, observer).await?;
    println!("{}", ConsoleFormatter.render(&result, output.format));

    if result.successful().count() == 0 {
        bail!("No provider returned an answer");
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    let mut errors = Vec::new();
    for issue in config.validate() {
        match issue.severity {
            Severity::Warning => warn!("{}: {}", issue.field, issue.message),
            Severity::Error => errors.push(format!("{}: {}", issue.field, issue.message)),
        }
    }
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }

    Ok(config)
}

/// Registry from config, narrowed to `--provider` selections.
fn build_registry(cli: &Cli, config: &FileConfig) -> Result<ProviderRegistry> {
    let registry = config.provider_registry();
    if cli.providers.is_empty() {
        return Ok(registry);
    }

    let known = registry.ids();
    if let Some(unknown) = cli
        .providers
        .iter()
        .find(|p| !known.iter().any(|id| id.as_str() == p.as_str()))
    {
        bail!(
            "Unknown or disabled provider '{}'. Available: {}",
            unknown,
            known.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
        );
    }

    Ok(registry.retain(|id| cli.providers.iter().any(|p| p == id.as_str())))
}

/// Environment and config keys, overridden by `--key` flags.
fn build_credentials(cli: &Cli, config: &FileConfig, registry: &ProviderRegistry) -> CredentialSet {
    let mut credentials = config.credentials_from_env();
    for key in &cli.keys {
        if !registry.contains(&key.provider) {
            warn!("Ignoring --key for inactive provider '{}'", key.provider);
            continue;
        }
        credentials.set(key.provider.clone(), key.value.clone());
    }
    credentials
}

fn print_providers(registry: &ProviderRegistry, credentials: &CredentialSet) {
    for provider in registry.list_providers() {
        let status = if credentials.is_configured(provider.id()) {
            "key set"
        } else {
            "no key"
        };
        println!(
            "{:<10} {:<14} {:<28} {:<8} {}",
            provider.id(),
            provider.display_name(),
            provider.model(),
            status,
            provider.endpoint()
        );
    }
}
