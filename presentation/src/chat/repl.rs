//! REPL (Read-Eval-Print Loop) for interactive chat

use super::command::{ReplCommand, HISTORY_EXCLUSION_PREFIX};
use crate::output::formatter::OutputFormatter;
use crate::{ConsoleFormatter, ProgressReporter};
use colored::Colorize;
use fanout_application::{FanOutSession, HttpTransport, NoProgress, OutcomeObserver};
use fanout_domain::{OutputFormat, ProviderId};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

const HISTORY_CAPACITY: usize = 1000;

/// Interactive chat REPL
pub struct ChatRepl<T: HttpTransport + 'static> {
    session: Arc<FanOutSession<T>>,
    show_progress: bool,
    format: OutputFormat,
    history_path: Option<PathBuf>,
}

impl<T: HttpTransport + 'static> ChatRepl<T> {
    /// Create a new ChatRepl
    pub fn new(session: Arc<FanOutSession<T>>) -> Self {
        Self {
            session,
            show_progress: true,
            format: OutputFormat::Panels,
            history_path: None,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_history(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> std::io::Result<()> {
        let mut line_editor = Reedline::create()
            .with_history_exclusion_prefix(Some(HISTORY_EXCLUSION_PREFIX.to_string()));

        if let Some(path) = &self.history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
                Ok(history) => line_editor = line_editor.with_history(Box::new(history)),
                Err(e) => warn!("History disabled: {}", e),
            }
        }

        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("fanout".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match line_editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim_end();
                    if line.trim_start().is_empty() {
                        continue;
                    }
                    if self.handle(ReplCommand::parse(line)).await {
                        break;
                    }
                }
                Signal::CtrlC => {
                    println!("^C");
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│              fanout - Chat Mode             │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        self.print_providers();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?            - Show this help");
        println!("  /providers, /p           - Show providers and key status");
        println!("  /key <provider> <key>    - Set a provider key for this session");
        println!("  /unset <provider>        - Remove a provider key");
        println!("  /status, /s              - Show outcomes of the last question");
        println!("  /quit, /exit, /q         - Exit chat");
        println!();
    }

    fn print_providers(&self) {
        let credentials = self.session.credentials();
        println!("Providers:");
        for provider in self.session.registry().list_providers() {
            let status = if credentials.is_configured(provider.id()) {
                "key set".green()
            } else {
                "no key".dimmed()
            };
            println!(
                "  {:<10} {:<14} {:<28} {}",
                provider.id(),
                provider.display_name(),
                provider.model(),
                status
            );
        }
        println!();
    }

    fn print_status(&self) {
        let snapshot = self.session.outcomes();
        let Some(submission) = snapshot.submission else {
            println!("No question asked yet.");
            return;
        };
        println!("Submission {}:", submission);
        for (provider, outcome) in &snapshot.outcomes {
            let state = match outcome.as_str() {
                "success" => outcome.as_str().green(),
                "failure" => outcome.as_str().red(),
                other => other.yellow(),
            };
            println!("  {:<10} {}", provider, state);
        }
        println!();
    }

    /// Execute one command. Returns true if the REPL should exit.
    async fn handle(&self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => Self::print_help(),
            ReplCommand::Providers => self.print_providers(),
            ReplCommand::Status => self.print_status(),
            ReplCommand::SetKey { provider, value } => {
                match self.session.set_credential(provider.clone(), value) {
                    Ok(()) => println!("Key set for {}.", provider),
                    Err(e) => println!("{}", e.to_string().red()),
                }
            }
            ReplCommand::Unset(provider) => self.unset(&provider),
            ReplCommand::Invalid(message) => println!("{}", message),
            ReplCommand::Ask(question) => self.process_question(&question).await,
        }
        false
    }

    fn unset(&self, provider: &ProviderId) {
        if self.session.clear_credential(provider) {
            println!("Key removed for {}.", provider);
        } else {
            println!("No key was set for {}.", provider);
        }
    }

    async fn process_question(&self, question: &str) {
        println!();

        let observer: Arc<dyn OutcomeObserver> = if self.show_progress {
            Arc::new(ProgressReporter::new())
        } else {
            Arc::new(NoProgress)
        };

        match self.session.ask(question, observer).await {
            Ok(result) => {
                println!("{}", ConsoleFormatter.render(&result, self.format));
            }
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), e);
            }
        }
        println!();
    }
}
