//! Prompt templates for the consult flow

use crate::consult::answer::Answer;
use crate::core::provider::ProviderId;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Default system prompt for the answering providers
    pub fn answer_system() -> &'static str {
        "You are a knowledgeable medical assistant who gives concise and accurate answers \
to medical questions. Base your answers on established medical knowledge and be clear \
about the limits of your knowledge."
    }

    /// User prompt for providers that take no system prompt.
    ///
    /// `prefix` is prepended verbatim; an empty prefix yields the bare question.
    pub fn answer_query(prefix: &str, question: &str) -> String {
        if prefix.is_empty() {
            question.to_string()
        } else {
            format!("{}{}", prefix, question)
        }
    }

    /// Default prefix for providers configured without a system prompt
    pub fn answer_prefix() -> &'static str {
        "As a medical assistant, give a concise and accurate answer to this question: "
    }

    /// System prompt for the summary
    pub fn summary_system() -> &'static str {
        "Write a concise summary (at most 6 sentences) that combines the key points and \
the consensus of the different AI answers. Focus only on relevant information and do not \
refer to the AI models themselves."
    }

    /// User prompt for the summary.
    ///
    /// Every answer is included, failure placeholders too, so the summary
    /// backend can see which parts of the panel were missing.
    pub fn summary_prompt(question: &str, answers: &[Answer]) -> String {
        let answers_text = answers
            .iter()
            .map(|a| format!("{}: {}", a.provider(), a.text()))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            "Question: {}\n\nAnswers from different AI models:\n\n{}",
            question, answers_text
        )
    }

    /// User-safe text placed in a failed provider's answer slot
    pub fn provider_failure(provider: &ProviderId) -> String {
        format!(
            "An error occurred while processing the {} answer.",
            provider
        )
    }

    /// User-safe text placed in a timed-out provider's answer slot
    pub fn provider_timeout(provider: &ProviderId) -> String {
        format!("{} did not answer in time.", provider)
    }

    /// Summary used when synthesis itself fails
    pub fn fallback_summary() -> &'static str {
        "A summary of the answers could not be produced."
    }
}
