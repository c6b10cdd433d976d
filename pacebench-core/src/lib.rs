#![warn(missing_docs)]
//! PaceBench Core - Measurement Engine
//!
//! This crate provides the measurement pipeline for benchmark candidates:
//! - `AccuracySettings` presets resolving to numeric knobs
//! - Adaptive invocation calibration against a target iteration time
//! - No-op overhead estimation, cached per run in an explicit `RunContext`
//! - The iteration executor collecting samples and the representative call
//!   result, with panic isolation per candidate
//! - The `ProgressObserver` seam for external renderers
//!
//! Execution is single-threaded and strictly sequential: one candidate at a
//! time, one iteration at a time. The wall-clock time consumed by
//! invocations is intentional — it IS the measurement.

mod calibrate;
mod error;
mod executor;
mod observer;
mod overhead;
mod settings;
mod timer;

pub use calibrate::{Calibration, MAX_INVOCATIONS, calibrate};
pub use error::BenchError;
pub use executor::{IterationSample, Measured, measure};
pub use observer::{NoopObserver, ProgressObserver};
pub use overhead::RunContext;
pub use settings::AccuracySettings;
pub use timer::Timer;
