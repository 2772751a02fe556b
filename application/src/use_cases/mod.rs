//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod consult;
pub mod fan_out;
pub mod summarize;
