//! Console output formatter for consult results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use consult_domain::{Answer, ConsultResult};

/// Formats consult results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete consult result
    pub fn format(question: &str, result: &ConsultResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Multi-Model Consult"));
        output.push('\n');

        output.push_str(&format!("{} {}\n\n", "Question:".cyan().bold(), question));

        output.push_str(&format!(
            "{} {}\n",
            "Providers:".cyan().bold(),
            Self::provider_names(result)
        ));

        output.push_str(&Self::section_header("Answers"));
        for answer in result.answers.iter() {
            output.push_str(&Self::format_answer(answer));
        }

        output.push_str(&Self::section_header("Summary"));
        output.push_str(&format!("\n{}\n", result.summary));

        output.push_str(&format!(
            "\n{}\n",
            format!(
                "{}/{} providers answered, {} tokens (approximate where not reported)",
                result.answers.successful().count(),
                result.answers.len(),
                result.answers.total_tokens()
            )
            .dimmed()
        ));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &ConsultResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format summary only (concise output)
    pub fn format_summary_only(question: &str, result: &ConsultResult) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Consult Summary ===".cyan().bold()));

        output.push_str(&format!("{} {}\n\n", "Q:".bold(), question));

        output.push_str(&format!(
            "{} {}\n",
            "Providers consulted:".dimmed(),
            Self::provider_names(result)
        ));

        if result.is_partial() {
            let failed: Vec<_> = result
                .answers
                .failed()
                .map(|a| a.provider().as_str())
                .collect();
            output.push_str(&format!(
                "{} {}\n",
                "No answer from:".yellow(),
                failed.join(", ")
            ));
        }

        output.push('\n');
        output.push_str(&result.summary);
        output.push('\n');

        output
    }

    fn format_answer(answer: &Answer) -> String {
        let title = format!(
            "── {} ({} tokens, {} ms) ──",
            answer.provider(),
            answer.token_count(),
            answer.latency_ms()
        );
        if answer.is_ok() {
            format!("\n{}\n{}\n", title.yellow().bold(), answer.text())
        } else {
            format!(
                "\n{}\n{}\n",
                format!("── {} (failed, {} ms) ──", answer.provider(), answer.latency_ms())
                    .red()
                    .bold(),
                answer.text()
            )
        }
    }

    fn provider_names(result: &ConsultResult) -> String {
        result
            .answers
            .iter()
            .map(|a| a.provider().as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, question: &str, result: &ConsultResult) -> String {
        Self::format(question, result)
    }

    fn format_json(&self, result: &ConsultResult) -> String {
        Self::format_json(result)
    }

    fn format_summary_only(&self, question: &str, result: &ConsultResult) -> String {
        Self::format_summary_only(question, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::OutputFormat;
    use consult_domain::{AnswerSet, ProviderId};

    fn result() -> ConsultResult {
        ConsultResult::new(
            AnswerSet::new(vec![
                Answer::success(
                    ProviderId::new("GPT-4 Turbo").unwrap(),
                    "Usually viral.",
                    12,
                    850,
                ),
                Answer::failure(
                    ProviderId::new("Claude 3").unwrap(),
                    "An error occurred while processing the Claude 3 answer.",
                    1200,
                ),
            ]),
            "Most sore throats are viral and pass on their own.",
        )
    }

    #[test]
    fn test_full_lists_every_answer_in_order() {
        let output = ConsoleFormatter::format("sore throat?", &result());
        let gpt = output.find("Usually viral.").unwrap();
        let claude = output.find("An error occurred while processing").unwrap();
        assert!(gpt < claude);
        assert!(output.contains("Claude 3 (failed, 1200 ms)"));
        assert!(output.contains("Most sore throats are viral"));
        assert!(output.contains("1/2 providers answered, 12 tokens"));
    }

    #[test]
    fn test_summary_only_names_silent_providers() {
        let output = ConsoleFormatter::format_summary_only("sore throat?", &result());
        assert!(output.contains("sore throat?"));
        assert!(output.contains("GPT-4 Turbo, Claude 3"));
        let silent = output
            .lines()
            .find(|line| line.contains("No answer from:"))
            .unwrap();
        assert!(silent.contains("Claude 3"));
        assert!(!silent.contains("GPT-4 Turbo"));
        assert!(!output.contains("Usually viral."));
        assert!(output.ends_with("Most sore throats are viral and pass on their own.\n"));
    }

    #[test]
    fn test_json_uses_wire_field_names() {
        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&result())).unwrap();
        assert_eq!(json["summary"], "Most sore throats are viral and pass on their own.");
        assert_eq!(json["answers"][0]["provider"], "GPT-4 Turbo");
        assert_eq!(json["answers"][0]["tokens"], 12);
        assert_eq!(json["answers"][0]["latencyMs"], 850);
        assert_eq!(json["answers"][1]["ok"], false);
    }

    #[test]
    fn test_render_dispatches_on_format() {
        let result = result();
        let json = ConsoleFormatter.render(OutputFormat::Json, "q", &result);
        assert!(json.trim_start().starts_with('{'));
        let summary = ConsoleFormatter.render(OutputFormat::Summary, "q", &result);
        assert!(summary.contains("Consult Summary"));
    }
}
