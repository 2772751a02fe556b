//! Errors raised while building provider clients from configuration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderBuildError {
    #[error("No providers configured")]
    NoProviders,

    #[error("Invalid provider configuration: {0}")]
    InvalidProvider(String),

    #[error("Duplicate provider name: {0}")]
    DuplicateProvider(String),

    #[error("Summarizer '{0}' does not match any configured provider")]
    UnknownSummarizer(String),
}
