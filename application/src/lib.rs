//! Application layer for multi-consult
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ConsultParams;
pub use ports::{
    consult_history::{ConsultHistory, ConsultRecord, HistoryError},
    progress::{ConsultProgressNotifier, NoProgress},
    provider_client::{Completion, ProviderClient, ProviderError, SynthesisBackend},
};
pub use use_cases::consult::{ConsultError, ConsultService, ErrorBody, ErrorKind};
pub use use_cases::fan_out::FanOut;
pub use use_cases::summarize::Summarizer;
