//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`]: a validated question to pose to every provider
//! - [`provider::ProviderId`]: the stable name of a configured backend
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod provider;
pub mod question;
