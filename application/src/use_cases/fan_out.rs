//! Fan-out use case
//!
//! Puts one question to every provider at once and collects exactly one
//! [`Answer`] per provider, in configuration order.

use crate::config::consult_params::DEFAULT_PROVIDER_TIMEOUT;
use crate::ports::progress::ConsultProgressNotifier;
use crate::ports::provider_client::{ProviderClient, elapsed_ms};
use consult_domain::{Answer, AnswerSet, ConsultPhase, PromptTemplate, Question};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Concurrent dispatch with a per-provider deadline.
///
/// Semantics are wait-all and fail-soft: every provider gets its own task
/// and its own timeout, a failed or timed-out provider yields a failure
/// placeholder, and the call returns only after every task has resolved.
/// Dropping the returned future aborts all tasks still in flight.
#[derive(Debug, Clone)]
pub struct FanOut {
    provider_timeout: Duration,
}

impl Default for FanOut {
    fn default() -> Self {
        Self::new(DEFAULT_PROVIDER_TIMEOUT)
    }
}

impl FanOut {
    pub fn new(provider_timeout: Duration) -> Self {
        Self { provider_timeout }
    }

    /// Query every provider and return their answers in `providers` order.
    pub async fn fan_out(
        &self,
        question: &Question,
        providers: &[Arc<dyn ProviderClient>],
        progress: &dyn ConsultProgressNotifier,
    ) -> AnswerSet {
        info!(
            "Querying {} providers (timeout {:?} each)",
            providers.len(),
            self.provider_timeout
        );
        progress.on_phase_start(ConsultPhase::Querying, providers.len());

        let started = Instant::now();
        let mut join_set = JoinSet::new();

        for (index, provider) in providers.iter().enumerate() {
            let provider = Arc::clone(provider);
            let question = question.clone();
            let timeout = self.provider_timeout;

            join_set.spawn(async move {
                let call_start = Instant::now();
                let answer = match tokio::time::timeout(timeout, provider.query(&question)).await {
                    Ok(answer) => answer,
                    Err(_) => {
                        warn!("Provider {} timed out after {:?}", provider.identity(), timeout);
                        Answer::failure(
                            provider.identity().clone(),
                            PromptTemplate::provider_timeout(provider.identity()),
                            elapsed_ms(call_start),
                        )
                    }
                };
                (index, answer)
            });
        }

        // Each task owns one slot; slots are only read after the join loop.
        let mut slots: Vec<Option<Answer>> = vec![None; providers.len()];

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, answer)) => {
                    debug!(
                        provider = %answer.provider(),
                        ok = answer.is_ok(),
                        latency_ms = answer.latency_ms(),
                        "Provider resolved"
                    );
                    progress.on_answer(&answer);
                    slots[index] = Some(answer);
                }
                Err(e) => {
                    // The slot is filled below once every task has resolved
                    warn!("Provider task did not complete: {}", e);
                }
            }
        }

        let answers = slots
            .into_iter()
            .zip(providers)
            .map(|(slot, provider)| {
                slot.unwrap_or_else(|| {
                    let answer = Answer::failure(
                        provider.identity().clone(),
                        PromptTemplate::provider_failure(provider.identity()),
                        elapsed_ms(started),
                    );
                    progress.on_answer(&answer);
                    answer
                })
            })
            .collect::<Vec<_>>();

        let answers = AnswerSet::new(answers);
        info!(
            "All providers resolved in {}ms ({} ok, {} failed)",
            elapsed_ms(started),
            answers.successful().count(),
            answers.failed().count()
        );
        progress.on_phase_complete(ConsultPhase::Querying);
        answers
    }
}
