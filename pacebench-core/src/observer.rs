//! Progress Observation
//!
//! Completion events for external renderers. Observer calls happen outside
//! the timed window and must not block or alter timing; no return value is
//! consumed.

use std::time::Duration;

/// Receives informational completion events during a run.
pub trait ProgressObserver {
    /// One measured iteration of `candidate` finished. `percent` is the
    /// candidate-local completion percentage (0–100); `elapsed` is the time
    /// since that candidate's measurement started.
    fn iteration_completed(&self, candidate: &str, percent: f64, elapsed: Duration) {
        let _ = (candidate, percent, elapsed);
    }

    /// A candidate finished (measured or failed). `percent` is the
    /// run-level completion percentage; `elapsed` is the time since the run
    /// started.
    fn candidate_completed(&self, candidate: &str, percent: f64, elapsed: Duration) {
        let _ = (candidate, percent, elapsed);
    }
}

/// Observer that ignores all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_observer_accepts_events() {
        let observer = NoopObserver;
        observer.iteration_completed("bench", 50.0, Duration::from_millis(1));
        observer.candidate_completed("bench", 100.0, Duration::from_millis(2));
    }
}
