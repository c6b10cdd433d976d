//! Accuracy Settings
//!
//! Immutable per-run configuration resolving presets to numeric knobs.
//! Constructed once per run and shared read-only by every candidate in it.

use crate::error::BenchError;
use std::time::Duration;

/// Measurement accuracy configuration.
///
/// Presets trade run time against statistical confidence:
/// - [`AccuracySettings::default`] — full warmup and 30 measured iterations
/// - [`AccuracySettings::fast`] — shorter warmup and target, 10 iterations
/// - [`AccuracySettings::instant`] — 2 iterations of a single invocation,
///   no warmup, no overhead subtraction, no calibration; for smoke runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccuracySettings {
    /// Throwaway invocations before calibration begins, letting first-call
    /// effects (caching, lazy initialization) settle
    pub warmup_count: u32,
    /// Duration one timed iteration block should approximate
    pub target_iteration_time: Duration,
    /// Number of measured iterations feeding statistics
    pub iteration_count: u32,
    /// Whether the cached no-op overhead estimate is subtracted from every
    /// measured average
    pub subtract_overhead: bool,
    /// Explicit invocations per iteration; when set, calibration is skipped
    /// and this count is used verbatim
    pub fixed_invocation_count: Option<u64>,
}

impl Default for AccuracySettings {
    fn default() -> Self {
        Self {
            warmup_count: 100,
            target_iteration_time: Duration::from_millis(100),
            iteration_count: 30,
            subtract_overhead: true,
            fixed_invocation_count: None,
        }
    }
}

impl AccuracySettings {
    /// Reduced-accuracy preset for quick local comparisons.
    pub fn fast() -> Self {
        Self {
            warmup_count: 10,
            target_iteration_time: Duration::from_millis(20),
            iteration_count: 10,
            subtract_overhead: true,
            fixed_invocation_count: None,
        }
    }

    /// Minimal preset: two iterations of one invocation each, skipping
    /// warmup, calibration and overhead subtraction entirely.
    pub fn instant() -> Self {
        Self {
            warmup_count: 0,
            target_iteration_time: Duration::ZERO,
            iteration_count: 2,
            subtract_overhead: false,
            fixed_invocation_count: Some(1),
        }
    }

    /// Explicit settings with validation.
    pub fn custom(
        warmup_count: u32,
        target_iteration_time: Duration,
        iteration_count: u32,
        subtract_overhead: bool,
    ) -> Result<Self, BenchError> {
        let settings = Self {
            warmup_count,
            target_iteration_time,
            iteration_count,
            subtract_overhead,
            fixed_invocation_count: None,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Pin the invocations-per-iteration count, bypassing calibration.
    pub fn with_fixed_invocations(mut self, invocations: u64) -> Self {
        self.fixed_invocation_count = Some(invocations);
        self
    }

    /// Check internal consistency.
    ///
    /// A zero target is only valid when a fixed invocation count bypasses
    /// calibration.
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.iteration_count < 1 {
            return Err(BenchError::Configuration(
                "iteration_count must be at least 1".to_string(),
            ));
        }
        if self.fixed_invocation_count.is_none() && self.target_iteration_time.is_zero() {
            return Err(BenchError::Configuration(
                "target_iteration_time must be positive when calibration is required".to_string(),
            ));
        }
        if self.fixed_invocation_count == Some(0) {
            return Err(BenchError::Configuration(
                "fixed_invocation_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
