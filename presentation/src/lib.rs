//! Presentation layer for multi-consult
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the HTTP consult endpoint.

pub mod cli;
pub mod output;
pub mod progress;
pub mod server;

// Re-export commonly used types
pub use cli::commands::{AskArgs, Cli, Command, OutputFormat, ServeArgs};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use server::{ServerState, router, serve};
