//! Output formatter trait

use crate::cli::commands::OutputFormat;
use consult_domain::ConsultResult;

/// Trait for formatting consult results
pub trait OutputFormatter {
    /// Format every answer and the summary
    fn format(&self, question: &str, result: &ConsultResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &ConsultResult) -> String;

    /// Format the summary only (concise output)
    fn format_summary_only(&self, question: &str, result: &ConsultResult) -> String;

    /// Dispatch on the selected output format
    fn render(&self, format: OutputFormat, question: &str, result: &ConsultResult) -> String {
        match format {
            OutputFormat::Full => self.format(question, result),
            OutputFormat::Summary => self.format_summary_only(question, result),
            OutputFormat::Json => self.format_json(result),
        }
    }
}
