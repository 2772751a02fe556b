//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod consult_history;
pub mod progress;
pub mod provider_client;
