//! Consult use case
//!
//! The public entry point: validates the question, fans it out to every
//! provider, then summarizes the collected answers.

use crate::config::ConsultParams;
use crate::ports::progress::{ConsultProgressNotifier, NoProgress};
use crate::ports::provider_client::{ProviderClient, SynthesisBackend};
use crate::use_cases::fan_out::FanOut;
use crate::use_cases::summarize::Summarizer;
use consult_domain::{ConsultPhase, ConsultResult, DomainError, Question, find_duplicate};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Errors surfaced to the caller of a consult.
///
/// Provider and summary failures never appear here; they are carried as
/// data inside the [`ConsultResult`].
#[derive(Error, Debug)]
pub enum ConsultError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Consult cancelled")]
    Cancelled,
}

/// Machine-readable failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    InvalidInput,
    ConfigurationError,
    InternalError,
    Cancelled,
}

/// Serializable `{ kind, message }` failure body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

impl ConsultError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConsultError::InvalidInput(_) => ErrorKind::InvalidInput,
            ConsultError::Configuration(_) => ErrorKind::ConfigurationError,
            ConsultError::Internal(_) => ErrorKind::InternalError,
            ConsultError::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Human-readable reason that is safe to show to end users.
    ///
    /// Internal details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            ConsultError::InvalidInput(reason) => format!("The question is invalid: {}", reason),
            ConsultError::Configuration(reason) => {
                format!("The consult service is not configured correctly: {}", reason)
            }
            ConsultError::Internal(_) => {
                "An error occurred while processing your question.".to_string()
            }
            ConsultError::Cancelled => "The consult was cancelled.".to_string(),
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            kind: self.kind(),
            message: self.user_message(),
        }
    }
}

impl From<DomainError> for ConsultError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidQuestion(reason) => ConsultError::InvalidInput(reason),
            DomainError::NoProviders | DomainError::DuplicateProvider(_) => {
                ConsultError::Configuration(e.to_string())
            }
            DomainError::InvalidProvider(_) => ConsultError::Configuration(e.to_string()),
            DomainError::Cancelled => ConsultError::Cancelled,
        }
    }
}

/// Use case for running one consult
pub struct ConsultService {
    providers: Vec<Arc<dyn ProviderClient>>,
    fan_out: FanOut,
    summarizer: Summarizer,
}

impl ConsultService {
    pub fn new(
        providers: Vec<Arc<dyn ProviderClient>>,
        summary_backend: Arc<dyn SynthesisBackend>,
        params: ConsultParams,
    ) -> Self {
        Self {
            fan_out: FanOut::new(params.provider_timeout),
            summarizer: Summarizer::new(summary_backend, &params),
            providers,
        }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn run(&self, question: &str) -> Result<ConsultResult, ConsultError> {
        self.run_with_progress(question, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn run_with_progress(
        &self,
        question: &str,
        progress: &dyn ConsultProgressNotifier,
    ) -> Result<ConsultResult, ConsultError> {
        let mut phase = ConsultPhase::Received;
        let question = Question::parse(question)?;
        self.check_providers()?;
        info!("Consult received ({} providers)", self.providers.len());

        self.enter(&mut phase);
        let answers = self
            .fan_out
            .fan_out(&question, &self.providers, progress)
            .await;

        if answers.len() != self.providers.len() {
            error!(
                "Fan-out returned {} answers for {} providers",
                answers.len(),
                self.providers.len()
            );
            return Err(ConsultError::Internal(format!(
                "expected {} answers, got {}",
                self.providers.len(),
                answers.len()
            )));
        }

        self.enter(&mut phase);
        let summary = self.summarizer.summarize(&question, &answers, progress).await;

        self.enter(&mut phase);
        Ok(ConsultResult::new(answers, summary))
    }

    /// Execute the use case, stopping early when `token` is cancelled.
    ///
    /// Cancellation aborts every provider call still in flight; answers that
    /// already arrived are discarded with the rest of the request.
    pub async fn run_with_cancellation(
        &self,
        question: &str,
        progress: &dyn ConsultProgressNotifier,
        token: &CancellationToken,
    ) -> Result<ConsultResult, ConsultError> {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                warn!("Consult cancelled by caller");
                Err(ConsultError::Cancelled)
            }
            result = self.run_with_progress(question, progress) => result,
        }
    }

    fn check_providers(&self) -> Result<(), DomainError> {
        if self.providers.is_empty() {
            return Err(DomainError::NoProviders);
        }
        if let Some(duplicate) = find_duplicate(self.providers.iter().map(|p| p.identity())) {
            return Err(DomainError::DuplicateProvider(duplicate.to_string()));
        }
        Ok(())
    }

    fn enter(&self, phase: &mut ConsultPhase) {
        if let Some(next) = phase.advance() {
            debug!("Consult phase: {}", next);
        }
    }
}
