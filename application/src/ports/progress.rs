//! Progress notification port
//!
//! Defines the interface for reporting progress during a consult.

use consult_domain::{Answer, ConsultPhase};

/// Callback for progress updates during a consult
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, logs, etc.)
pub trait ConsultProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: ConsultPhase, total_tasks: usize);

    /// Called as each provider's answer arrives (arrival order)
    fn on_answer(&self, answer: &Answer);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: ConsultPhase);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ConsultProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: ConsultPhase, _total_tasks: usize) {}
    fn on_answer(&self, _answer: &Answer) {}
    fn on_phase_complete(&self, _phase: ConsultPhase) {}
}
