//! Consult value objects and the per-request lifecycle.
//!
//! - [`answer::Answer`] / [`answer::AnswerSet`]: one normalized answer per provider
//! - [`result::ConsultResult`]: answers plus the synthesized summary
//! - [`phase::ConsultPhase`]: forward-only request state machine
//! - [`tokens`]: advisory token estimation for backends without usage data

pub mod answer;
pub mod phase;
pub mod result;
pub mod tokens;
