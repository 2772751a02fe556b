//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Default listen address for `serve`
pub const DEFAULT_ADDR: &str = "127.0.0.1:8787";

/// Output format for consult results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the summary
    Summary,
    /// Every provider answer followed by the summary
    Full,
    /// JSON output
    Json,
}

impl From<consult_domain::OutputFormat> for OutputFormat {
    fn from(format: consult_domain::OutputFormat) -> Self {
        match format {
            consult_domain::OutputFormat::Summary => OutputFormat::Summary,
            consult_domain::OutputFormat::Full => OutputFormat::Full,
            consult_domain::OutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for multi-consult
#[derive(Parser, Debug)]
#[command(name = "multi-consult")]
#[command(author, version, about = "Ask several AI models at once and get one short summary")]
#[command(long_about = r#"
Multi-consult puts one question to every configured AI provider in parallel,
waits for all of them (each under its own timeout), and summarizes the
answers with a designated provider.

A provider that fails or times out still appears in the result, marked as
failed; it never stops the others.

Configuration files are loaded from (in priority order):
1. MULTI_CONSULT_* environment variables
2. --config <path>     Explicit config file
3. ./consult.toml      Project-level config
4. ~/.config/multi-consult/config.toml   Global config

Example:
  multi-consult ask "What causes a persistent dry cough?"
  multi-consult ask --output full --timeout 10 "Is ibuprofen safe with coffee?"
  multi-consult serve --addr 0.0.0.0:8787
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to a daily-rolling file in this directory
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask every provider one question and print the result
    Ask(AskArgs),
    /// Serve `POST /consult` over HTTP
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question to ask
    pub question: String,

    /// Output format (defaults to the config file, then `summary`)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Per-provider timeout in seconds, overriding the config file
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Append the completed consult to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub history: Option<PathBuf>,

    /// User identifier stored with the history record
    #[arg(long, value_name = "ID", requires = "history")]
    pub user: Option<String>,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, default_value = DEFAULT_ADDR)]
    pub addr: String,

    /// Per-provider timeout in seconds, overriding the config file
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Append every completed consult to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub history: Option<PathBuf>,
}
