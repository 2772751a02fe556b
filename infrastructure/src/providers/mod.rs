//! Provider adapters
//!
//! One HTTP client per backend family. Every client implements both
//! [`ProviderClient`] (answering) and [`SynthesisBackend`] (summary), and
//! receives an immutable [`ProviderSettings`] at construction.

pub mod anthropic;
pub mod error;
mod http;
pub mod openai;

pub use anthropic::AnthropicClient;
pub use error::ProviderBuildError;
pub use openai::OpenAiClient;

use crate::config::FileProviderConfig;
use consult_application::{ProviderClient, SynthesisBackend};
use consult_domain::{ProviderId, find_duplicate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Backend wire protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    /// OpenAI chat completions, or any compatible endpoint (xAI, Groq, ...)
    #[serde(rename = "openai")]
    OpenAi,
    /// Anthropic messages API
    #[serde(rename = "anthropic")]
    Anthropic,
}

impl ProviderKind {
    pub fn as_str(&self) -> &str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "https://api.openai.com",
            ProviderKind::Anthropic => "https://api.anthropic.com",
        }
    }

    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolved, immutable settings for one provider client.
///
/// Credentials are read once when the settings are built; clients never
/// look at the environment at call time.
#[derive(Clone)]
pub struct ProviderSettings {
    pub id: ProviderId,
    pub kind: ProviderKind,
    pub model: String,
    pub base_url: String,
    /// `None` when no key was configured; every call then fails.
    pub api_key: Option<String>,
    /// Where the key was expected, for error messages.
    pub api_key_source: String,
    pub system_prompt: Option<String>,
    pub prompt_prefix: String,
    pub max_tokens: Option<u32>,
    pub api_version: String,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_source", &self.api_key_source)
            .finish_non_exhaustive()
    }
}

impl ProviderSettings {
    /// Endpoint URL for `path`, tolerating a trailing slash on the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Answering clients in configuration order plus the summary backend.
pub struct ProviderSet {
    pub clients: Vec<Arc<dyn ProviderClient>>,
    pub summarizer: Arc<dyn SynthesisBackend>,
}

/// Build one client per configured provider.
///
/// `summarizer` names the provider that also writes the summary; the first
/// provider is used when it is `None`.
pub fn build_provider_set(
    configs: &[FileProviderConfig],
    summarizer: Option<&str>,
    http: reqwest::Client,
) -> Result<ProviderSet, ProviderBuildError> {
    if configs.is_empty() {
        return Err(ProviderBuildError::NoProviders);
    }

    let mut clients: Vec<Arc<dyn ProviderClient>> = Vec::with_capacity(configs.len());
    let mut backends: Vec<Arc<dyn SynthesisBackend>> = Vec::with_capacity(configs.len());

    for config in configs {
        let settings = config.resolve()?;
        if settings.api_key.is_none() {
            warn!(
                "No API key for provider {} (expected in {}); its answers will fail",
                settings.id, settings.api_key_source
            );
        }
        debug!("Configured provider {:?}", settings);

        match settings.kind {
            ProviderKind::OpenAi => {
                let client = Arc::new(OpenAiClient::new(settings, http.clone()));
                clients.push(client.clone());
                backends.push(client);
            }
            ProviderKind::Anthropic => {
                let client = Arc::new(AnthropicClient::new(settings, http.clone()));
                clients.push(client.clone());
                backends.push(client);
            }
        }
    }

    if let Some(duplicate) = find_duplicate(clients.iter().map(|c| c.identity())) {
        return Err(ProviderBuildError::DuplicateProvider(duplicate.to_string()));
    }

    let summarizer = match summarizer {
        Some(name) => backends
            .iter()
            .find(|b| b.identity().as_str() == name.trim())
            .cloned()
            .ok_or_else(|| ProviderBuildError::UnknownSummarizer(name.to_string()))?,
        None => Arc::clone(&backends[0]),
    };

    Ok(ProviderSet {
        clients,
        summarizer,
    })
}
