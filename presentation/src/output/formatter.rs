//! Output formatter trait

use fanout_application::FanOutResult;
use fanout_domain::OutputFormat;

/// Trait for formatting fan-out results
pub trait OutputFormatter {
    /// One panel per provider, answer or error
    fn format_panels(&self, result: &FanOutResult) -> String;

    /// Successful answers only (concise output)
    fn format_answers(&self, result: &FanOutResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &FanOutResult) -> String;

    fn render(&self, result: &FanOutResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Panels => self.format_panels(result),
            OutputFormat::Answers => self.format_answers(result),
            OutputFormat::Json => self.format_json(result),
        }
    }
}
