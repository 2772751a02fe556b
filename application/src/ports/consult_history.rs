//! Consult history port
//!
//! Lets the surrounding application keep completed consults. The consult
//! use cases never call this themselves; callers record a result after a
//! successful run.

use chrono::{DateTime, Utc};
use consult_domain::{AnswerSet, ConsultResult, Question};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Failed to serialize consult record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write consult record: {0}")]
    Write(String),
}

/// One stored consult, keyed by user and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub question: String,
    pub summary: String,
    pub answers: AnswerSet,
}

impl ConsultRecord {
    pub fn new(user: Option<String>, question: &Question, result: &ConsultResult) -> Self {
        Self {
            user,
            timestamp: Utc::now(),
            question: question.content().to_string(),
            summary: result.summary.clone(),
            answers: result.answers.clone(),
        }
    }
}

/// Storage for completed consults.
pub trait ConsultHistory: Send + Sync {
    fn record(&self, record: &ConsultRecord) -> Result<(), HistoryError>;
}
