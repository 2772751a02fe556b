//! Application-level configuration.
//!
//! - [`ConsultParams`]: per-call timeouts and the fallback summary text

pub mod consult_params;

pub use consult_params::ConsultParams;
