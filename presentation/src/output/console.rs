//! Console output formatter for fan-out results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use fanout_application::{FanOutResult, ProviderAnswer};
use fanout_domain::ProviderOutcome;

/// Formats fan-out results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Turn colors off globally when the config asks for it.
    ///
    /// Leaves terminal auto-detection alone when `enabled` is true.
    pub fn configure_color(enabled: bool) {
        if !enabled {
            colored::control::set_override(false);
        }
    }

    /// One panel per provider, in registry order
    pub fn format_panels(result: &FanOutResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("fanout Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Question:".cyan().bold(),
            result.question
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Providers:".cyan().bold(),
            result
                .answers
                .iter()
                .map(|a| a.display_name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));

        for answer in &result.answers {
            output.push('\n');
            output.push_str(&Self::panel(answer));
        }

        output.push_str(&format!("\n{}\n", "=".repeat(60).cyan()));
        output.push_str(&Self::summary(result));
        output.push('\n');

        output
    }

    /// Successful answers only
    pub fn format_answers(result: &FanOutResult) -> String {
        let mut output = String::new();

        for answer in result.successful() {
            if let ProviderOutcome::Success(text) = &answer.outcome {
                output.push_str(&format!(
                    "{}\n{}\n\n",
                    format!("== {} ==", answer.display_name).yellow().bold(),
                    text.trim_end()
                ));
            }
        }

        if output.is_empty() {
            output.push_str(&format!("{}\n", "No provider returned an answer.".dimmed()));
        }

        output
    }

    /// Format as JSON
    pub fn format_json(result: &FanOutResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    fn panel(answer: &ProviderAnswer) -> String {
        let title = if answer.model.is_empty() {
            format!("── {} ──", answer.display_name)
        } else {
            format!("── {} ({}) ──", answer.display_name, answer.model)
        };
        let timing = format!("{} ms", answer.duration_ms).dimmed();

        match &answer.outcome {
            ProviderOutcome::Success(text) => format!(
                "{} {}\n{}\n",
                title.yellow().bold(),
                timing,
                text.trim_end()
            ),
            ProviderOutcome::Failure(message) => format!(
                "{} {}\n{} {}\n",
                title.red().bold(),
                timing,
                "Error:".red(),
                message
            ),
            ProviderOutcome::Pending => {
                format!("{}\n{}\n", title.dimmed(), "Still waiting...".dimmed())
            }
        }
    }

    fn summary(result: &FanOutResult) -> String {
        let answered = result.successful().count();
        let line = format!(
            "{} of {} providers answered",
            answered,
            result.answers.len()
        );
        let line = if answered == result.answers.len() {
            line.green().to_string()
        } else if answered == 0 {
            line.red().to_string()
        } else {
            line.yellow().to_string()
        };

        if result.superseded {
            format!(
                "{}\n{}",
                line,
                "A newer question was submitted before these answers arrived.".dimmed()
            )
        } else {
            line
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_panels(&self, result: &FanOutResult) -> String {
        Self::format_panels(result)
    }

    fn format_answers(&self, result: &FanOutResult) -> String {
        Self::format_answers(result)
    }

    fn format_json(&self, result: &FanOutResult) -> String {
        Self::format_json(result)
    }
}
