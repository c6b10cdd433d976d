//! Invocation Calibration
//!
//! Finds the invocation count whose back-to-back execution approximates the
//! target iteration time. Too few invocations and timer resolution dominates
//! the measurement; too many and the run wastes wall-clock time.

use crate::settings::AccuracySettings;
use crate::timer::Timer;
use std::hint::black_box;
use std::time::Duration;

/// Upper bound on invocations per iteration the search will try.
pub const MAX_INVOCATIONS: u64 = 1 << 32;

/// Upper bound on search rounds before falling back to the last tried count.
const MAX_SEARCH_ROUNDS: u32 = 16;

/// Result of calibrating one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    /// Invocations per iteration, shared by all measured iterations of the
    /// candidate. Always at least 1.
    pub invocation_count: u64,
    /// False when the search bound was exhausted and the last tried count
    /// was used as-is.
    pub converged: bool,
}

/// Determine the invocation count for one candidate.
///
/// Runs `warmup_count` throwaway invocations first; their results never
/// enter statistics. With a fixed invocation count configured the search is
/// skipped and the explicit value is used verbatim. Otherwise the search
/// starts at one invocation, times a block of the current count, and accepts
/// once the block reaches half the target; a short block scales the count by
/// `target / observed` rounded up, at least doubling. A candidate whose
/// single invocation already exceeds the target floors at 1 — never zero.
pub fn calibrate<T, F>(f: &mut F, settings: &AccuracySettings) -> Calibration
where
    F: FnMut() -> T,
{
    for _ in 0..settings.warmup_count {
        let _ = black_box(f());
    }

    if let Some(fixed) = settings.fixed_invocation_count {
        return Calibration {
            invocation_count: fixed.max(1),
            converged: true,
        };
    }

    let target = settings.target_iteration_time;
    let mut count: u64 = 1;

    for _ in 0..MAX_SEARCH_ROUNDS {
        let observed = time_block(f, count);
        if observed * 2 >= target {
            return Calibration {
                invocation_count: count,
                converged: true,
            };
        }
        count = next_count(count, observed, target);
    }

    tracing::warn!(
        invocations = count,
        target_ns = target.as_nanos() as u64,
        "calibration search exhausted its bound; using last tried invocation count"
    );
    Calibration {
        invocation_count: count,
        converged: false,
    }
}

fn time_block<T, F>(f: &mut F, count: u64) -> Duration
where
    F: FnMut() -> T,
{
    let timer = Timer::start();
    for _ in 0..count {
        let _ = black_box(f());
    }
    timer.stop()
}

/// Scale the count toward the target, clamping zero readings from the timer
/// before dividing.
fn next_count(count: u64, observed: Duration, target: Duration) -> u64 {
    let observed_ns = observed.as_nanos().max(1) as f64;
    let target_ns = target.as_nanos() as f64;
    let scaled = ((count as f64) * (target_ns / observed_ns)).ceil() as u64;
    scaled.max(count.saturating_mul(2)).min(MAX_INVOCATIONS)
}
