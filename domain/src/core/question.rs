//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A question to be answered by every provider (Value Object)
///
/// The content is kept as the caller wrote it; only the emptiness check
/// looks at the trimmed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Question {
    content: String,
}

impl Question {
    /// Create a new question, rejecting empty or whitespace-only content.
    pub fn parse(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::InvalidQuestion(
                "question must not be empty".to_string(),
            ));
        }
        Ok(Self { content })
    }

    /// Try to create a new question, returning None if invalid
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        Self::parse(content).ok()
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::parse(s)
    }
}

impl TryFrom<&str> for Question {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Question::parse(s)
    }
}

impl From<Question> for String {
    fn from(q: Question) -> Self {
        q.content
    }
}
