//! Configuration file loading for multi-consult
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `MULTI_CONSULT_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./consult.toml` or `./.consult.toml`
//! 4. Global: `$XDG_CONFIG_HOME/multi-consult/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    DEFAULT_ANTHROPIC_VERSION, FileConfig, FileConsultConfig, FileOutputConfig,
    FileProviderConfig, default_providers,
};
pub use loader::{ConfigLoadError, ConfigLoader};
