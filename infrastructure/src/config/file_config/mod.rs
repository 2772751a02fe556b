//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod consult;
mod output;
mod providers;

pub use consult::FileConsultConfig;
pub use output::FileOutputConfig;
pub use providers::{DEFAULT_ANTHROPIC_VERSION, FileProviderConfig, default_providers};

use consult_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Fan-out and summary settings
    pub consult: FileConsultConfig,
    /// Providers in query order; a file that sets this replaces the built-in list
    pub providers: Vec<FileProviderConfig>,
    /// Output settings
    pub output: FileOutputConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            consult: FileConsultConfig::default(),
            providers: default_providers(),
            output: FileOutputConfig::default(),
        }
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors make the provider set unbuildable; warnings have a fallback.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.providers.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NoProviders,
                "providers: at least one provider must be configured",
            ));
        }

        let mut seen = HashSet::new();
        for (index, provider) in self.providers.iter().enumerate() {
            let name = provider.name.trim();
            if name.is_empty() {
                issues.push(empty_field(format!("providers[{}].name", index)));
            } else if !seen.insert(name) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::DuplicateProvider {
                        name: name.to_string(),
                    },
                    format!("providers: '{}' is configured more than once", name),
                ));
            }
            if provider.model.trim().is_empty() {
                issues.push(empty_field(format!("providers[{}].model", index)));
            }
        }

        if let Some(summarizer) = &self.consult.summarizer
            && !self.providers.iter().any(|p| p.name.trim() == summarizer.trim())
        {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::UnknownSummarizer {
                    name: summarizer.clone(),
                },
                format!(
                    "consult.summarizer: '{}' is not a configured provider",
                    summarizer
                ),
            ));
        }

        issues.extend(self.consult.to_params().1);

        issues
    }
}

fn empty_field(field: String) -> ConfigIssue {
    ConfigIssue::error(
        ConfigIssueCode::EmptyField {
            field: field.clone(),
        },
        format!("{}: must not be empty", field),
    )
}
