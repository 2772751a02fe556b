//! Consult configuration from TOML (`[consult]` section)

use consult_application::ConsultParams;
use consult_domain::{ConfigIssue, ConfigIssueCode, PromptTemplate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw consult settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConsultConfig {
    /// Deadline for each provider call, in seconds
    pub provider_timeout_secs: u64,
    /// Deadline for the summary call, in seconds
    pub summary_timeout_secs: u64,
    /// Provider name of the designated summary backend.
    /// Defaults to the first configured provider.
    pub summarizer: Option<String>,
    /// Summary shown when synthesis fails
    pub fallback_summary: String,
}

impl Default for FileConsultConfig {
    fn default() -> Self {
        Self {
            provider_timeout_secs: 30,
            summary_timeout_secs: 30,
            summarizer: None,
            fallback_summary: PromptTemplate::fallback_summary().to_string(),
        }
    }
}

impl FileConsultConfig {
    /// Convert to [`ConsultParams`], replacing zero timeouts with defaults.
    ///
    /// Returns the params together with any issues found.
    pub fn to_params(&self) -> (ConsultParams, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut params = ConsultParams::default().with_fallback_summary(&self.fallback_summary);

        if self.provider_timeout_secs == 0 {
            issues.push(zero_timeout("consult.provider_timeout_secs"));
        } else {
            params = params.with_provider_timeout(Duration::from_secs(self.provider_timeout_secs));
        }

        if self.summary_timeout_secs == 0 {
            issues.push(zero_timeout("consult.summary_timeout_secs"));
        } else {
            params = params.with_summary_timeout(Duration::from_secs(self.summary_timeout_secs));
        }

        (params, issues)
    }
}

fn zero_timeout(field: &str) -> ConfigIssue {
    ConfigIssue::warning(
        ConfigIssueCode::ZeroTimeout {
            field: field.to_string(),
        },
        format!("{}: timeout cannot be 0, using the default of 30s", field),
    )
}
