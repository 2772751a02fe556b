//! Answer value objects - one normalized answer per provider.

use crate::core::provider::ProviderId;
use serde::{Deserialize, Serialize};

/// Normalized answer from a single provider.
///
/// `ok = false` marks a provider-level failure: `text` then carries a
/// user-safe message and `token_count` is always zero. `latency_ms` is
/// measured in both cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    provider: ProviderId,
    text: String,
    #[serde(rename = "tokens")]
    token_count: u64,
    #[serde(rename = "latencyMs")]
    latency_ms: u64,
    ok: bool,
}

impl Answer {
    /// Creates a successful answer.
    pub fn success(
        provider: ProviderId,
        text: impl Into<String>,
        token_count: u64,
        latency_ms: u64,
    ) -> Self {
        Self {
            provider,
            text: text.into(),
            token_count,
            latency_ms,
            ok: true,
        }
    }

    /// Creates a failure placeholder carrying a user-safe message.
    pub fn failure(provider: ProviderId, message: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            provider,
            text: message.into(),
            token_count: 0,
            latency_ms,
            ok: false,
        }
    }

    pub fn provider(&self) -> &ProviderId {
        &self.provider
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn token_count(&self) -> u64 {
        self.token_count
    }

    pub fn latency_ms(&self) -> u64 {
        self.latency_ms
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }
}

/// Answers in provider configuration order, exactly one per provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(Vec<Answer>);

impl AnswerSet {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self(answers)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Answer> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Answer> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Answer] {
        &self.0
    }

    /// Returns an iterator over only the successful answers.
    pub fn successful(&self) -> impl Iterator<Item = &Answer> {
        self.0.iter().filter(|a| a.ok)
    }

    /// Returns an iterator over only the failure placeholders.
    pub fn failed(&self) -> impl Iterator<Item = &Answer> {
        self.0.iter().filter(|a| !a.ok)
    }

    pub fn total_tokens(&self) -> u64 {
        self.0.iter().map(|a| a.token_count).sum()
    }
}

impl<'a> IntoIterator for &'a AnswerSet {
    type Item = &'a Answer;
    type IntoIter = std::slice::Iter<'a, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
