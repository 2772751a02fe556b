//! CLI entrypoint for multi-consult
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use consult_application::{
    ConsultHistory, ConsultParams, ConsultProgressNotifier, ConsultRecord, ConsultService,
    NoProgress,
};
use consult_domain::{ConsultResult, Question};
use consult_infrastructure::{ConfigLoader, FileConfig, JsonlConsultHistory, build_provider_set};
use consult_presentation::{
    AskArgs, Cli, Command, ConsoleFormatter, OutputFormat, OutputFormatter, ProgressReporter,
    ServeArgs, ServerState, SimpleProgress,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let Some(command) = cli.command else {
        bail!("No command given. Try `multi-consult ask \"<question>\"` or `multi-consult --help`.");
    };

    info!("Starting multi-consult");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };
    check_config(&config)?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    match command {
        Command::Ask(args) => ask(&config, args).await,
        Command::Serve(args) => serve(&config, args).await,
    }
}

/// Initialize logging based on verbosity level; `RUST_LOG` wins when set.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Could not create log directory {}", dir.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "multi-consult.log"));
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr)
                .init();
            Ok(None)
        }
    }
}

/// Log every config issue and refuse to start on errors.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            error!("{}", issue);
        } else {
            warn!("{}", issue);
        }
    }

    let errors = issues.iter().filter(|i| i.is_error()).count();
    if errors > 0 {
        bail!("Configuration has {} error(s); run with --show-config to see which files were read", errors);
    }
    Ok(())
}

fn consult_params(config: &FileConfig, timeout_override: Option<u64>) -> Result<ConsultParams> {
    // Issues were already reported by check_config
    let (params, _) = config.consult.to_params();
    match timeout_override {
        Some(0) => bail!("--timeout must be greater than 0"),
        Some(secs) => Ok(params.with_provider_timeout(Duration::from_secs(secs))),
        None => Ok(params),
    }
}

// === Dependency Injection ===
fn build_service(config: &FileConfig, timeout_override: Option<u64>) -> Result<ConsultService> {
    let params = consult_params(config, timeout_override)?;

    let http = reqwest::Client::builder()
        .user_agent(concat!("multi-consult/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Could not build HTTP client")?;

    let providers = build_provider_set(
        &config.providers,
        config.consult.summarizer.as_deref(),
        http,
    )?;

    info!(
        "Configured {} providers, summary by {}",
        providers.clients.len(),
        providers.summarizer.identity()
    );

    Ok(ConsultService::new(
        providers.clients,
        providers.summarizer,
        params,
    ))
}

/// Cancel `token` on Ctrl-C.
fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted");
            token.cancel();
        }
    });
}

async fn ask(config: &FileConfig, args: AskArgs) -> Result<()> {
    let service = build_service(config, args.timeout)?;

    let format = args
        .output
        .or(config.output.format.map(OutputFormat::from))
        .unwrap_or(OutputFormat::Summary);

    let progress: Box<dyn ConsultProgressNotifier> = if args.quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let token = CancellationToken::new();
    cancel_on_ctrl_c(token.clone());

    let result = match service
        .run_with_cancellation(&args.question, progress.as_ref(), &token)
        .await
    {
        Ok(result) => result,
        Err(e) => {
            error!("Consult failed: {}", e);
            bail!(e.user_message());
        }
    };

    if let Some(path) = &args.history {
        record_history(path, args.user.clone(), &args.question, &result);
    }

    println!("{}", ConsoleFormatter.render(format, &args.question, &result));

    Ok(())
}

/// Persisting is best effort; a failure is logged and the consult still succeeds.
fn record_history(path: &Path, user: Option<String>, question: &str, result: &ConsultResult) {
    let Some(history) = JsonlConsultHistory::new(path) else {
        return;
    };
    let Ok(question) = Question::parse(question) else {
        return;
    };
    if let Err(e) = history.record(&ConsultRecord::new(user, &question, result)) {
        warn!("Could not record consult: {}", e);
    }
}

async fn serve(config: &FileConfig, args: ServeArgs) -> Result<()> {
    let service = Arc::new(build_service(config, args.timeout)?);

    let mut state = ServerState::new(service);
    if let Some(path) = &args.history {
        match JsonlConsultHistory::new(path) {
            Some(history) => state = state.with_history(Arc::new(history)),
            None => warn!("History disabled: could not open {}", path.display()),
        }
    }

    let listener = TcpListener::bind(&args.addr)
        .await
        .with_context(|| format!("Could not listen on {}", args.addr))?;

    let shutdown = CancellationToken::new();
    cancel_on_ctrl_c(shutdown.clone());

    consult_presentation::serve(listener, state, shutdown).await?;
    info!("Server stopped");
    Ok(())
}
