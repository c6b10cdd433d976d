//! Iteration Executor
//!
//! Produces the population of iteration samples feeding statistics and
//! captures one call result for equality grouping. A panicking candidate
//! yields no partial statistics; the failure is reported and the rest of the
//! suite continues.

use crate::calibrate::calibrate;
use crate::error::BenchError;
use crate::observer::ProgressObserver;
use crate::overhead::RunContext;
use crate::settings::AccuracySettings;
use crate::timer::Timer;
use std::hint::black_box;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::{Duration, Instant};

/// One iteration's mean invocation duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationSample {
    /// Mean invocation duration over the iteration, overhead already
    /// subtracted (never negative)
    pub average: Duration,
    /// Invocations the iteration block executed
    pub invocations: u64,
}

/// Immutable record of one successfully measured candidate.
#[derive(Debug, Clone)]
pub struct Measured<T> {
    /// Candidate name
    pub name: String,
    /// One sample per measured iteration, in execution order
    pub samples: Vec<IterationSample>,
    /// Invocations per iteration chosen by calibration
    pub invocation_count: u64,
    /// Whether calibration converged (false = fallback count in use)
    pub calibration_converged: bool,
    /// Return value of the first invocation of the first measured
    /// iteration, retained for equality comparison
    pub call_result: T,
}

/// Measure one candidate: calibrate, run the measured iterations, capture
/// the representative call result.
///
/// The overhead estimate is resolved through `ctx` (computed on first use,
/// cached for the run) when `subtract_overhead` is set, and zero otherwise.
/// A panic inside the candidate aborts only that candidate, surfacing as
/// [`BenchError::Invocation`].
pub fn measure<T, F>(
    name: &str,
    mut f: F,
    settings: &AccuracySettings,
    ctx: &mut RunContext,
    observer: &dyn ProgressObserver,
) -> Result<Measured<T>, BenchError>
where
    F: FnMut() -> T,
{
    settings.validate()?;

    let overhead = if settings.subtract_overhead {
        ctx.overhead_estimate(settings)
    } else {
        Duration::ZERO
    };

    tracing::debug!(
        candidate = name,
        overhead_ns = overhead.as_nanos() as u64,
        "measuring candidate"
    );

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let calibration = calibrate(&mut f, settings);
        let (samples, first) = collect_samples(
            &mut f,
            settings.iteration_count,
            calibration.invocation_count,
            overhead,
            name,
            observer,
        );
        (calibration, samples, first)
    }));

    match outcome {
        Ok((calibration, samples, Some(call_result))) => Ok(Measured {
            name: name.to_string(),
            samples,
            invocation_count: calibration.invocation_count,
            calibration_converged: calibration.converged,
            call_result,
        }),
        Ok((_, _, None)) => Err(BenchError::Invocation {
            name: name.to_string(),
            message: "candidate produced no call result".to_string(),
        }),
        Err(panic) => Err(BenchError::Invocation {
            name: name.to_string(),
            message: panic_message(panic),
        }),
    }
}

/// Run the measured iteration loop, collecting samples and the first call
/// result. No warmup happens here — that already ran during calibration.
pub(crate) fn collect_samples<T, F>(
    f: &mut F,
    iterations: u32,
    invocations: u64,
    overhead: Duration,
    name: &str,
    observer: &dyn ProgressObserver,
) -> (Vec<IterationSample>, Option<T>)
where
    F: FnMut() -> T,
{
    let started = Instant::now();
    let mut samples = Vec::with_capacity(iterations as usize);
    let mut first: Option<T> = None;

    for iteration in 0..iterations {
        let timer = Timer::start();
        for invocation in 0..invocations {
            if iteration == 0 && invocation == 0 {
                first = Some(black_box(f()));
            } else {
                let _ = black_box(f());
            }
        }
        let elapsed = timer.stop();

        let average = average_invocation(elapsed, invocations);
        samples.push(IterationSample {
            average: subtract_overhead(average, overhead),
            invocations,
        });

        // Outside the timed window
        let percent = (iteration + 1) as f64 * 100.0 / iterations as f64;
        observer.iteration_completed(name, percent, started.elapsed());
    }

    (samples, first)
}

/// Mean invocation duration of one iteration block.
fn average_invocation(total: Duration, invocations: u64) -> Duration {
    let nanos = (total.as_nanos() as f64 / invocations as f64).round() as u64;
    Duration::from_nanos(nanos)
}

/// Subtract the per-invocation overhead, saturating at zero.
fn subtract_overhead(raw: Duration, overhead: Duration) -> Duration {
    raw.saturating_sub(overhead)
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
