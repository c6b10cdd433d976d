//! Console Progress
//!
//! Indicatif-backed implementation of the core progress-observer seam. The
//! engine calls in outside its timed windows, so drawing here cannot bias
//! the measurement.

use indicatif::{ProgressBar, ProgressStyle};
use pacebench_core::ProgressObserver;
use std::time::Duration;

/// Terminal progress bar advancing one tick per completed candidate.
pub struct ConsoleProgress {
    bar: ProgressBar,
}

impl ConsoleProgress {
    /// Create a bar sized to the run's total candidate count.
    pub fn new(total_candidates: u64) -> Self {
        let bar = ProgressBar::new(total_candidates);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { bar }
    }

    /// Finish the bar with a closing message.
    pub fn finish(&self) {
        self.bar.finish_with_message("Complete");
    }
}

impl ProgressObserver for ConsoleProgress {
    fn iteration_completed(&self, candidate: &str, percent: f64, _elapsed: Duration) {
        self.bar
            .set_message(format!("{} ({:.0}%)", candidate, percent));
    }

    fn candidate_completed(&self, candidate: &str, _percent: f64, _elapsed: Duration) {
        self.bar.set_message(candidate.to_string());
        self.bar.inc(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_accepts_events_without_terminal() {
        let progress = ConsoleProgress::new(2);
        progress.iteration_completed("bench_a", 50.0, Duration::from_millis(1));
        progress.candidate_completed("bench_a", 50.0, Duration::from_millis(2));
        progress.candidate_completed("bench_b", 100.0, Duration::from_millis(3));
        progress.finish();
    }
}
