//! Summarize use case
//!
//! Turns a full answer set into one short synthesized text.

use crate::config::ConsultParams;
use crate::ports::progress::ConsultProgressNotifier;
use crate::ports::provider_client::SynthesisBackend;
use consult_domain::{AnswerSet, ConsultPhase, PromptTemplate, Question};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Writes the summary through the designated backend.
///
/// Never fails: any error, timeout, panic or blank output from the backend
/// yields the fallback text instead.
pub struct Summarizer {
    backend: Arc<dyn SynthesisBackend>,
    timeout: Duration,
    fallback: String,
}

impl Summarizer {
    pub fn new(backend: Arc<dyn SynthesisBackend>, params: &ConsultParams) -> Self {
        Self {
            backend,
            timeout: params.summary_timeout,
            fallback: params.fallback_summary.clone(),
        }
    }

    pub async fn summarize(
        &self,
        question: &Question,
        answers: &AnswerSet,
        progress: &dyn ConsultProgressNotifier,
    ) -> String {
        info!("Summarizing {} answers via {}", answers.len(), self.backend.identity());
        progress.on_phase_start(ConsultPhase::Summarizing, 1);

        let summary = self.synthesize(question, answers).await;

        progress.on_phase_complete(ConsultPhase::Summarizing);
        summary
    }

    async fn synthesize(&self, question: &Question, answers: &AnswerSet) -> String {
        let prompt = PromptTemplate::summary_prompt(question.content(), answers.as_slice());
        let backend = Arc::clone(&self.backend);
        let timeout = self.timeout;

        // Run on its own task so a panicking backend cannot take the request down;
        // the JoinSet aborts the call if this future is dropped.
        let mut join_set = JoinSet::new();
        join_set.spawn(async move {
            tokio::time::timeout(
                timeout,
                backend.synthesize(PromptTemplate::summary_system(), &prompt),
            )
            .await
        });

        let outcome = match join_set.join_next().await {
            Some(Ok(outcome)) => outcome,
            Some(Err(e)) => {
                warn!("Summary task did not complete: {}", e);
                return self.fallback.clone();
            }
            None => return self.fallback.clone(),
        };

        match outcome {
            Ok(Ok(text)) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(Ok(_)) => {
                warn!("Summary backend returned empty text, using fallback");
                self.fallback.clone()
            }
            Ok(Err(e)) => {
                warn!("Summary generation failed: {}", e);
                self.fallback.clone()
            }
            Err(_) => {
                warn!("Summary generation timed out after {:?}", timeout);
                self.fallback.clone()
            }
        }
    }
}
