//! Progress reporting for consult execution

use colored::Colorize;
use consult_application::ConsultProgressNotifier;
use consult_domain::{Answer, ConsultPhase};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress during a consult with a progress bar on stderr
pub struct ProgressReporter {
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            phase_bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn answer_status(answer: &Answer) -> String {
        if answer.is_ok() {
            format!("{} {}", "v".green(), answer.provider())
        } else {
            format!("{} {}", "x".red(), answer.provider())
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsultProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: ConsultPhase, total_tasks: usize) {
        let pb = match phase {
            ConsultPhase::Querying => {
                let pb = ProgressBar::new(total_tasks as u64);
                pb.set_style(Self::bar_style());
                pb.set_message("Waiting for answers...");
                pb
            }
            _ => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(Self::spinner_style());
                pb.enable_steady_tick(Duration::from_millis(100));
                pb.set_message("Working...");
                pb
            }
        };
        pb.set_prefix(phase.display_name().to_string());

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_answer(&self, answer: &Answer) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            pb.set_message(Self::answer_status(answer));
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: ConsultPhase) {
        if let Ok(mut slot) = self.phase_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_with_message(format!("{} done", phase.display_name().green()));
        }
    }
}

/// Simple line-based progress on stderr (no fancy UI)
pub struct SimpleProgress;

impl ConsultProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: ConsultPhase, total_tasks: usize) {
        eprintln!(
            "{} {} ({} tasks)",
            "->".cyan(),
            phase.display_name().bold(),
            total_tasks
        );
    }

    fn on_answer(&self, answer: &Answer) {
        if answer.is_ok() {
            eprintln!(
                "  {} ({} ms)",
                ProgressReporter::answer_status(answer),
                answer.latency_ms()
            );
        } else {
            eprintln!("  {} (failed)", ProgressReporter::answer_status(answer));
        }
    }

    fn on_phase_complete(&self, _phase: ConsultPhase) {}
}
