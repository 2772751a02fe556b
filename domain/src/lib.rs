//! Domain layer for multi-consult
//!
//! This crate contains the core entities and value objects of a consult.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Consult
//!
//! One [`Question`] is put to every configured provider at once. Each provider
//! contributes exactly one [`Answer`] (a failure placeholder when it could not
//! answer), collected into an [`AnswerSet`] in configuration order. A single
//! summary is then synthesized from the whole set, giving a [`ConsultResult`].

pub mod config;
pub mod consult;
pub mod core;
pub mod prompt;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use consult::{
    answer::{Answer, AnswerSet},
    phase::ConsultPhase,
    result::ConsultResult,
    tokens::{CHARS_PER_TOKEN, estimate_tokens, resolve_token_count},
};
pub use core::{
    error::DomainError,
    provider::{ProviderId, find_duplicate},
    question::Question,
};
pub use prompt::PromptTemplate;
