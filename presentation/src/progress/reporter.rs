//! Progress reporting while providers answer

use colored::Colorize;
use fanout_application::OutcomeObserver;
use fanout_domain::{ProviderDescriptor, ProviderId, ProviderOutcome, SubmissionId};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// One spinner per provider, each finishing as its provider settles
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<ProviderId, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn finished_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("  {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bars(&self) -> std::sync::MutexGuard<'_, HashMap<ProviderId, ProgressBar>> {
        self.bars.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeObserver for ProgressReporter {
    fn on_submission_start(
        &self,
        _submission: SubmissionId,
        providers: &[Arc<dyn ProviderDescriptor>],
    ) {
        let mut bars = self.bars();
        for bar in bars.values() {
            bar.finish_and_clear();
        }
        bars.clear();

        for provider in providers {
            let pb = self.multi.add(ProgressBar::new_spinner());
            pb.set_style(Self::spinner_style());
            pb.set_prefix(format!("{:<14}", provider.display_name()));
            pb.set_message("waiting...");
            pb.enable_steady_tick(Duration::from_millis(100));
            bars.insert(provider.id().clone(), pb);
        }
    }

    fn on_outcome(&self, _submission: SubmissionId, provider: &ProviderId, outcome: &ProviderOutcome) {
        if let Some(pb) = self.bars().get(provider) {
            pb.set_style(Self::finished_style());
            let status = match outcome {
                ProviderOutcome::Success(text) => {
                    format!("{} answered ({} chars)", "v".green(), text.chars().count())
                }
                ProviderOutcome::Failure(_) => format!("{} failed", "x".red()),
                ProviderOutcome::Pending => return,
            };
            pb.finish_with_message(status);
        }
    }

    fn on_all_settled(&self, _submission: SubmissionId) {
        for pb in self.bars().values() {
            if !pb.is_finished() {
                pb.finish_and_clear();
            }
        }
    }
}

/// Line-per-event progress for non-interactive stderr (pipes, CI logs)
pub struct SimpleProgress {
    out: Mutex<Box<dyn Write + Send>>,
}

impl SimpleProgress {
    pub fn new() -> Self {
        Self::with_writer(std::io::stderr())
    }

    pub fn with_writer(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }

    fn line(&self, text: std::fmt::Arguments<'_>) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(out, "{}", text);
    }
}

impl Default for SimpleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeObserver for SimpleProgress {
    fn on_submission_start(
        &self,
        submission: SubmissionId,
        providers: &[Arc<dyn ProviderDescriptor>],
    ) {
        self.line(format_args!(
            "{} {} {} ({} providers)",
            "->".cyan(),
            "Asking".bold(),
            submission,
            providers.len()
        ));
    }

    fn on_outcome(&self, _submission: SubmissionId, provider: &ProviderId, outcome: &ProviderOutcome) {
        match outcome {
            ProviderOutcome::Success(_) => self.line(format_args!("  {} {}", "v".green(), provider)),
            ProviderOutcome::Failure(_) => {
                self.line(format_args!("  {} {} (failed)", "x".red(), provider))
            }
            ProviderOutcome::Pending => {}
        }
    }

    fn on_all_settled(&self, _submission: SubmissionId) {
        self.line(format_args!(""));
    }
}
