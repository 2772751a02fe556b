//! Consult parameters: timeouts and fallbacks for the consult use cases.

use consult_domain::PromptTemplate;
use std::time::Duration;

/// Default per-provider timeout.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for the summary call.
pub const DEFAULT_SUMMARY_TIMEOUT: Duration = Duration::from_secs(30);

/// Static parameters controlling one consult.
///
/// Timeouts apply to each call on its own. There is no request-wide
/// deadline; callers that need one wrap the consult future themselves.
#[derive(Debug, Clone)]
pub struct ConsultParams {
    /// Deadline for each provider call.
    pub provider_timeout: Duration,
    /// Deadline for the summary call.
    pub summary_timeout: Duration,
    /// Summary returned when synthesis fails.
    pub fallback_summary: String,
}

impl Default for ConsultParams {
    fn default() -> Self {
        Self {
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            summary_timeout: DEFAULT_SUMMARY_TIMEOUT,
            fallback_summary: PromptTemplate::fallback_summary().to_string(),
        }
    }
}

impl ConsultParams {
    // ==================== Builder Methods ====================

    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn with_summary_timeout(mut self, timeout: Duration) -> Self {
        self.summary_timeout = timeout;
        self
    }

    /// Sets the fallback summary. Blank text is ignored so the summary
    /// can never come back empty.
    pub fn with_fallback_summary(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.trim().is_empty() {
            self.fallback_summary = text;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ConsultParams::default();
        assert_eq!(params.provider_timeout, Duration::from_secs(30));
        assert_eq!(params.summary_timeout, Duration::from_secs(30));
        assert!(!params.fallback_summary.is_empty());
    }

    #[test]
    fn test_builder_methods() {
        let params = ConsultParams::default()
            .with_provider_timeout(Duration::from_secs(5))
            .with_summary_timeout(Duration::from_secs(10))
            .with_fallback_summary("No summary available.");
        assert_eq!(params.provider_timeout, Duration::from_secs(5));
        assert_eq!(params.summary_timeout, Duration::from_secs(10));
        assert_eq!(params.fallback_summary, "No summary available.");
    }

    #[test]
    fn test_blank_fallback_ignored() {
        let params = ConsultParams::default().with_fallback_summary("   ");
        assert_eq!(params.fallback_summary, PromptTemplate::fallback_summary());
    }
}
