//! Final consult result.

use super::answer::AnswerSet;
use serde::{Deserialize, Serialize};

/// Complete result of one consult: every provider's answer plus a summary.
///
/// The summary is always present; when synthesis fails it holds the
/// fallback text instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultResult {
    pub summary: String,
    pub answers: AnswerSet,
}

impl ConsultResult {
    pub fn new(answers: AnswerSet, summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            answers,
        }
    }

    /// Returns `true` if at least one provider failed.
    pub fn is_partial(&self) -> bool {
        self.answers.failed().next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consult::answer::Answer;
    use crate::core::provider::ProviderId;

    #[test]
    fn test_result_wire_shape() {
        let answers = AnswerSet::new(vec![Answer::success(
            ProviderId::new("GPT-4 Turbo").unwrap(),
            "Usually a virus.",
            12,
            800,
        )]);
        let result = ConsultResult::new(answers, "Most sore throats are viral.");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["summary"], "Most sore throats are viral.");
        assert_eq!(json["answers"][0]["provider"], "GPT-4 Turbo");
        assert_eq!(json["answers"][0]["latencyMs"], 800);
        assert!(!result.is_partial());
    }

    #[test]
    fn test_partial_when_any_failed() {
        let answers = AnswerSet::new(vec![
            Answer::success(ProviderId::new("A").unwrap(), "ok", 1, 1),
            Answer::failure(ProviderId::new("B").unwrap(), "down", 1),
        ]);
        assert!(ConsultResult::new(answers, "summary").is_partial());
    }
}
