//! Provider client port
//!
//! Defines the narrow contract every AI backend adapter satisfies:
//! send question text, receive answer text plus an optional usage count.
//! Wire formats stay inside the infrastructure adapters.

use async_trait::async_trait;
use consult_domain::{Answer, PromptTemplate, ProviderId, Question, resolve_token_count};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during a single backend call
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Empty response")]
    EmptyResponse,

    #[error("Timeout")]
    Timeout,
}

/// Text returned by a backend, with the usage count when it reports one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub reported_tokens: Option<u64>,
}

impl Completion {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reported_tokens: None,
        }
    }

    pub fn with_reported_tokens(mut self, tokens: Option<u64>) -> Self {
        self.reported_tokens = tokens;
        self
    }
}

/// One answering backend.
///
/// Implementations only provide [`send`](ProviderClient::send); the provided
/// [`query`](ProviderClient::query) turns every outcome into an [`Answer`],
/// so nothing raised by a backend crosses this boundary.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Fixed identity of this client
    fn identity(&self) -> &ProviderId;

    /// Send the question and return the raw completion
    async fn send(&self, question: &str) -> Result<Completion, ProviderError>;

    /// Query the backend and normalize the outcome.
    ///
    /// Latency covers the whole call, success or failure.
    async fn query(&self, question: &Question) -> Answer {
        let start = Instant::now();
        let result = self.send(question.content()).await;
        answer_from_result(self.identity(), result, elapsed_ms(start))
    }
}

/// The designated backend that writes the summary.
#[async_trait]
pub trait SynthesisBackend: Send + Sync {
    fn identity(&self) -> &ProviderId;

    /// Run one completion with an explicit system prompt
    async fn synthesize(&self, system_prompt: &str, prompt: &str) -> Result<String, ProviderError>;
}

/// Converts a backend outcome into an [`Answer`] for `provider`.
///
/// Errors are logged with their details; the answer only carries the
/// user-safe placeholder text. Blank completions count as failures.
pub fn answer_from_result(
    provider: &ProviderId,
    result: Result<Completion, ProviderError>,
    latency_ms: u64,
) -> Answer {
    match result {
        Ok(completion) if !completion.text.trim().is_empty() => {
            let tokens = resolve_token_count(completion.reported_tokens, &completion.text);
            debug!(
                provider = %provider,
                tokens,
                latency_ms,
                estimated = completion.reported_tokens.is_none(),
                "Provider answered"
            );
            Answer::success(provider.clone(), completion.text, tokens, latency_ms)
        }
        Ok(_) => {
            warn!("Provider {} returned an empty answer", provider);
            Answer::failure(
                provider.clone(),
                PromptTemplate::provider_failure(provider),
                latency_ms,
            )
        }
        Err(e) => {
            warn!("Provider {} failed: {}", provider, e);
            Answer::failure(
                provider.clone(),
                PromptTemplate::provider_failure(provider),
                latency_ms,
            )
        }
    }
}

/// Milliseconds elapsed since `start`, saturating at `u64::MAX`.
pub fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
