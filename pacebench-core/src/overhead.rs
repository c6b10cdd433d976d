//! Overhead Estimation
//!
//! Quantifies the fixed cost of the invocation mechanism itself by pushing a
//! no-op callable through the same calibration and iteration machinery as a
//! real candidate, so "work done" can be isolated from call machinery cost.
//!
//! The estimate is carried by an explicit per-run context rather than
//! process-wide state: independent runs (and tests) never share a cached
//! value.

use crate::calibrate::calibrate;
use crate::executor::collect_samples;
use crate::observer::NoopObserver;
use crate::settings::AccuracySettings;
use std::time::Duration;

/// Per-run measurement context holding the cached overhead estimate.
#[derive(Debug, Default)]
pub struct RunContext {
    overhead: Option<Duration>,
}

impl RunContext {
    /// Create a fresh context with no cached estimate.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached estimate, if one has been computed in this run.
    pub fn cached_overhead(&self) -> Option<Duration> {
        self.overhead
    }

    /// The per-invocation overhead estimate for this run.
    ///
    /// Computed on first use with a no-op probe and cached for the run's
    /// lifetime: re-estimating per candidate would itself add overhead and
    /// timing noise. Callers with `subtract_overhead` disabled skip this
    /// entirely and use zero.
    pub fn overhead_estimate(&mut self, settings: &AccuracySettings) -> Duration {
        if let Some(cached) = self.overhead {
            return cached;
        }

        let estimate = estimate_overhead(settings);
        tracing::debug!(
            overhead_ns = estimate.as_nanos() as u64,
            "cached no-op overhead estimate"
        );
        self.overhead = Some(estimate);
        estimate
    }
}

/// Median per-invocation duration of a no-op callable, measured with the
/// caller's accuracy settings and subtraction disabled. Progress events are
/// suppressed — the probe is machinery, not a candidate.
fn estimate_overhead(settings: &AccuracySettings) -> Duration {
    let probe_settings = AccuracySettings {
        subtract_overhead: false,
        ..settings.clone()
    };

    let mut noop = || {};
    let calibration = calibrate(&mut noop, &probe_settings);
    let (samples, _) = collect_samples(
        &mut noop,
        probe_settings.iteration_count,
        calibration.invocation_count,
        Duration::ZERO,
        "overhead-probe",
        &NoopObserver,
    );

    let nanos: Vec<f64> = samples
        .iter()
        .map(|s| s.average.as_nanos() as f64)
        .collect();
    Duration::from_nanos(pacebench_stats::median(&nanos).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe_settings() -> AccuracySettings {
        // Small but real search: calibration runs, iterations stay cheap.
        let mut settings = AccuracySettings::fast();
        settings.warmup_count = 0;
        settings.iteration_count = 3;
        settings.target_iteration_time = Duration::from_micros(200);
        settings
    }

    #[test]
    fn estimate_is_computed_once_per_context() {
        let settings = probe_settings();
        let mut ctx = RunContext::new();

        assert!(ctx.cached_overhead().is_none());
        let first = ctx.overhead_estimate(&settings);
        assert_eq!(ctx.cached_overhead(), Some(first));

        // Second call returns the cached value untouched.
        let second = ctx.overhead_estimate(&settings);
        assert_eq!(first, second);
    }

    #[test]
    fn fresh_contexts_do_not_share_estimates() {
        let settings = probe_settings();

        let mut a = RunContext::new();
        a.overhead_estimate(&settings);

        let b = RunContext::new();
        assert!(b.cached_overhead().is_none());
    }

    #[test]
    fn noop_overhead_is_small() {
        let settings = probe_settings();
        let mut ctx = RunContext::new();

        let estimate = ctx.overhead_estimate(&settings);

        // A no-op call costs nanoseconds, not milliseconds.
        assert!(estimate < Duration::from_micros(100));
    }
}
