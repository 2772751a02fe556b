//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No providers configured")]
    NoProviders,

    #[error("Duplicate provider: {0}")]
    DuplicateProvider(String),

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Invalid provider name: {0}")]
    InvalidProvider(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_error_display() {
        let error = DomainError::Cancelled;
        assert_eq!(error.to_string(), "Operation cancelled");
    }

    #[test]
    fn test_is_cancelled_check() {
        assert!(DomainError::Cancelled.is_cancelled());
        assert!(!DomainError::NoProviders.is_cancelled());
        assert!(!DomainError::InvalidQuestion("test".to_string()).is_cancelled());
    }

    #[test]
    fn test_duplicate_provider_display() {
        let error = DomainError::DuplicateProvider("Claude 3".to_string());
        assert_eq!(error.to_string(), "Duplicate provider: Claude 3");
    }
}
