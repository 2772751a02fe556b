//! Infrastructure layer for multi-consult
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP provider clients, configuration file
//! loading and consult history storage.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigLoadError, ConfigLoader, FileConfig, FileConsultConfig, FileOutputConfig, FileProviderConfig};
pub use logging::JsonlConsultHistory;
pub use providers::{
    AnthropicClient, OpenAiClient, ProviderBuildError, ProviderKind, ProviderSet,
    ProviderSettings, build_provider_set,
};
