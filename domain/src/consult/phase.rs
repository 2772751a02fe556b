//! Per-request consult lifecycle

use serde::{Deserialize, Serialize};

/// Phase of a single consult request.
///
/// Transitions only move forward:
/// `Received → Querying → Summarizing → Completed`.
/// Provider failures stay inside `Querying`; they never move the request
/// backwards or skip ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultPhase {
    #[default]
    Received,
    Querying,
    Summarizing,
    Completed,
}

impl ConsultPhase {
    pub fn as_str(&self) -> &str {
        match self {
            ConsultPhase::Received => "received",
            ConsultPhase::Querying => "querying",
            ConsultPhase::Summarizing => "summarizing",
            ConsultPhase::Completed => "completed",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            ConsultPhase::Received => "Received",
            ConsultPhase::Querying => "Querying Providers",
            ConsultPhase::Summarizing => "Summarizing",
            ConsultPhase::Completed => "Completed",
        }
    }

    /// The phase that follows this one, or `None` once completed.
    pub fn next(self) -> Option<Self> {
        match self {
            ConsultPhase::Received => Some(ConsultPhase::Querying),
            ConsultPhase::Querying => Some(ConsultPhase::Summarizing),
            ConsultPhase::Summarizing => Some(ConsultPhase::Completed),
            ConsultPhase::Completed => None,
        }
    }

    /// Moves to the next phase. Returns the new phase, or `None` when
    /// already completed (the phase is left unchanged).
    pub fn advance(&mut self) -> Option<Self> {
        let next = self.next()?;
        *self = next;
        Some(next)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ConsultPhase::Completed)
    }
}

impl std::fmt::Display for ConsultPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
