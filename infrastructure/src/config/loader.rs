//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "multi-consult";
const PROJECT_FILES: [&str; 2] = ["consult.toml", ".consult.toml"];
const ENV_PREFIX: &str = "MULTI_CONSULT_";

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables prefixed `MULTI_CONSULT_` (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./consult.toml` or `./.consult.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/multi-consult/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, ConfigLoadError> {
        if let Some(path) = config_path
            && !path.exists()
        {
            return Err(ConfigLoadError::NotFound(path.clone()));
        }

        let config = Self::figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        )
        .extract()
        .map_err(Box::new)?;
        Ok(config)
    }

    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(path) = global
            && path.exists()
        {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = project {
            figment = figment.merge(Toml::file(path));
        }

        // An explicit file must exist
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/multi-consult/config.toml if set,
    /// otherwise falls back to ~/.config/multi-consult/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Env:     {}*", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./consult.toml or ./.consult.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_providers;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn extract(figment: Figment) -> FileConfig {
        figment.extract().unwrap()
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.providers, default_providers());
        assert_eq!(config.consult.provider_timeout_secs, 30);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("multi-consult"));
    }

    #[test]
    fn test_no_files_yields_defaults() {
        let config = extract(ConfigLoader::figment(None, None, None));
        assert_eq!(config.providers.len(), 3);
    }

    #[test]
    fn test_project_file_overrides_global() {
        let global = toml_file(
            r#"
[consult]
provider_timeout_secs = 10
summary_timeout_secs = 10
"#,
        );
        let project = toml_file(
            r#"
[consult]
provider_timeout_secs = 20
"#,
        );

        let config = extract(ConfigLoader::figment(
            Some(global.path()),
            Some(project.path()),
            None,
        ));
        assert_eq!(config.consult.provider_timeout_secs, 20);
        assert_eq!(config.consult.summary_timeout_secs, 10);
    }

    #[test]
    fn test_explicit_providers_replace_defaults() {
        let explicit = toml_file(
            r#"
[[providers]]
name = "Local"
kind = "openai"
model = "llama3"
base_url = "http://localhost:11434"
"#,
        );

        let config = extract(ConfigLoader::figment(None, None, Some(explicit.path())));
        assert_eq!(config.providers.len(), 1);
        assert_eq!(config.providers[0].name, "Local");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let result: Result<FileConfig, _> =
            ConfigLoader::figment(None, None, Some(&missing)).extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_load_reports_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            ConfigLoader::load(Some(&missing)),
            Err(ConfigLoadError::NotFound(_))
        ));
    }

    #[test]
    fn test_missing_global_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.toml");
        let config = extract(ConfigLoader::figment(Some(&missing), None, None));
        assert_eq!(config.providers.len(), 3);
    }
}
