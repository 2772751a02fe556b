//! Provider configuration from TOML (`[[providers]]` array)

use crate::providers::{ProviderBuildError, ProviderKind, ProviderSettings};
use consult_domain::{PromptTemplate, ProviderId};
use serde::{Deserialize, Serialize};

/// Anthropic API version header sent when none is configured
pub const DEFAULT_ANTHROPIC_VERSION: &str = "2023-06-01";

/// One configured provider.
///
/// ```toml
/// [[providers]]
/// name = "Claude 3"
/// kind = "anthropic"
/// model = "claude-3-haiku-20240307"
/// api_key_env = "ANTHROPIC_API_KEY"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileProviderConfig {
    /// Display name, unique across providers
    pub name: String,
    /// Backend protocol
    pub kind: ProviderKind,
    /// Backend model identifier
    pub model: String,
    /// Base URL (default depends on `kind`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Environment variable holding the API key (default depends on `kind`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Inline API key, takes precedence over `api_key_env`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// System instruction sent with every question
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// Text prepended to the question
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Anthropic only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
}

impl FileProviderConfig {
    pub fn new(name: impl Into<String>, kind: ProviderKind, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            model: model.into(),
            base_url: None,
            api_key_env: None,
            api_key: None,
            system_prompt: None,
            prompt_prefix: None,
            max_tokens: None,
            api_version: None,
        }
    }

    /// Name of the environment variable consulted for the key
    pub fn key_env(&self) -> &str {
        self.api_key_env
            .as_deref()
            .unwrap_or_else(|| self.kind.default_api_key_env())
    }

    /// Resolve defaults and read the credential.
    ///
    /// The environment is read here and nowhere else.
    pub fn resolve(&self) -> Result<ProviderSettings, ProviderBuildError> {
        let id = ProviderId::new(&self.name)
            .map_err(|e| ProviderBuildError::InvalidProvider(e.to_string()))?;

        if self.model.trim().is_empty() {
            return Err(ProviderBuildError::InvalidProvider(format!(
                "provider '{}' has an empty model",
                id
            )));
        }

        let (api_key, api_key_source) = match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => (Some(key.to_string()), "config file".to_string()),
            _ => {
                let env = self.key_env();
                let key = std::env::var(env)
                    .ok()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty());
                (key, env.to_string())
            }
        };

        Ok(ProviderSettings {
            id,
            kind: self.kind,
            model: self.model.trim().to_string(),
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| self.kind.default_base_url().to_string()),
            api_key,
            api_key_source,
            system_prompt: self.system_prompt.clone(),
            prompt_prefix: self.prompt_prefix.clone().unwrap_or_default(),
            max_tokens: self.max_tokens,
            api_version: self
                .api_version
                .clone()
                .unwrap_or_else(|| DEFAULT_ANTHROPIC_VERSION.to_string()),
        })
    }
}

/// Built-in provider list used when no configuration names any.
pub fn default_providers() -> Vec<FileProviderConfig> {
    vec![
        FileProviderConfig {
            system_prompt: Some(PromptTemplate::answer_system().to_string()),
            ..FileProviderConfig::new("GPT-4 Turbo", ProviderKind::OpenAi, "gpt-4o")
        },
        FileProviderConfig {
            max_tokens: Some(1024),
            prompt_prefix: Some(PromptTemplate::answer_prefix().to_string()),
            ..FileProviderConfig::new("Claude 3", ProviderKind::Anthropic, "claude-3-haiku-20240307")
        },
        FileProviderConfig {
            base_url: Some("https://api.grok.ai".to_string()),
            api_key_env: Some("GROK_API_KEY".to_string()),
            system_prompt: Some(PromptTemplate::answer_system().to_string()),
            ..FileProviderConfig::new("Mixtral 8x7B", ProviderKind::OpenAi, "grok-1")
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_entry() {
        let toml_str = r#"
name = "Local"
kind = "openai"
model = "llama3"
base_url = "http://localhost:11434"
"#;
        let config: FileProviderConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.kind, ProviderKind::OpenAi);
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:11434"));
        assert!(config.api_key.is_none());
        assert_eq!(config.key_env(), "OPENAI_API_KEY");
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let toml_str = r#"
name = "X"
kind = "bedrock"
model = "m"
"#;
        assert!(toml::from_str::<FileProviderConfig>(toml_str).is_err());
    }

    #[test]
    fn test_resolve_applies_kind_defaults() {
        let config = FileProviderConfig {
            api_key: Some("  inline-key ".to_string()),
            ..FileProviderConfig::new("Claude 3", ProviderKind::Anthropic, "claude-3-haiku")
        };
        let settings = config.resolve().unwrap();
        assert_eq!(settings.id.as_str(), "Claude 3");
        assert_eq!(settings.base_url, "https://api.anthropic.com");
        assert_eq!(settings.api_key.as_deref(), Some("inline-key"));
        assert_eq!(settings.api_version, DEFAULT_ANTHROPIC_VERSION);
        assert_eq!(settings.prompt_prefix, "");
    }

    #[test]
    fn test_resolve_reads_named_env_var() {
        // Unique name so parallel tests cannot interfere
        let var = "CONSULT_TEST_KEY_RESOLVE";
        // SAFETY: no other test touches this variable
        unsafe { std::env::set_var(var, "from-env") };

        let config = FileProviderConfig {
            api_key_env: Some(var.to_string()),
            ..FileProviderConfig::new("Local", ProviderKind::OpenAi, "llama3")
        };
        let settings = config.resolve().unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("from-env"));
        assert_eq!(settings.api_key_source, var);

        unsafe { std::env::remove_var(var) };
    }

    #[test]
    fn test_resolve_missing_key_is_not_an_error() {
        let config = FileProviderConfig {
            api_key_env: Some("CONSULT_TEST_KEY_UNSET".to_string()),
            ..FileProviderConfig::new("Local", ProviderKind::OpenAi, "llama3")
        };
        let settings = config.resolve().unwrap();
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn test_resolve_rejects_blank_name_and_model() {
        let blank_name = FileProviderConfig::new("  ", ProviderKind::OpenAi, "gpt-4o");
        assert!(matches!(
            blank_name.resolve(),
            Err(ProviderBuildError::InvalidProvider(_))
        ));

        let blank_model = FileProviderConfig::new("GPT", ProviderKind::OpenAi, "");
        assert!(matches!(
            blank_model.resolve(),
            Err(ProviderBuildError::InvalidProvider(_))
        ));
    }

    #[test]
    fn test_default_providers() {
        let providers = default_providers();
        let names: Vec<_> = providers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["GPT-4 Turbo", "Claude 3", "Mixtral 8x7B"]);
        assert_eq!(providers[1].kind, ProviderKind::Anthropic);
        assert_eq!(providers[2].key_env(), "GROK_API_KEY");
    }
}
