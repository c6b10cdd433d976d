#![warn(missing_docs)]
//! # PaceBench
//!
//! Micro-benchmark harness with adaptive calibration, overhead subtraction
//! and output-equality grouping.
//!
//! PaceBench measures competing implementations of the same routine and
//! answers two questions at once: which candidate is fastest, and do the
//! candidates still agree on their output. Candidates whose captured results
//! compare equal land in the same equality group; within each group every
//! member gets a ratio relative to the group's fastest candidate. A
//! "faster" routine that silently computes something else therefore shows up
//! in its own group instead of winning the table.
//!
//! - **Adaptive calibration**: invocations per timed iteration are searched
//!   so one iteration block approximates the configured target time
//! - **Overhead subtraction**: the cost of the call machinery itself is
//!   measured with a no-op probe, cached per run and subtracted
//! - **Failure isolation**: a panicking candidate is reported and skipped;
//!   the rest of the suite completes
//! - **Parameter grids**: named value lists, benchmarked as a cross product
//!
//! ## Quick Start
//!
//! ```no_run
//! use pacebench::prelude::*;
//!
//! let mut suite = Suite::new("summing");
//! suite
//!     .settings(AccuracySettings::fast())
//!     .param("n", [1_000u32, 100_000])
//!     .register("iter_sum", |p| {
//!         let n = p.int("n").unwrap_or(0) as u64;
//!         (0..n).sum::<u64>()
//!     })
//!     .register("formula", |p| {
//!         let n = p.int("n").unwrap_or(0) as u64;
//!         n * n.saturating_sub(1) / 2
//!     });
//!
//! let results = suite.run().expect("benchmark run");
//! println!("{}", results.render());
//! ```

mod config;
mod params;
mod suite;

pub use config::{AccuracyConfig, PaceConfig};
pub use params::{ParamGrid, ParamSet, ParamValue};
pub use suite::{
    CandidateFailure, CandidateOutcome, CandidateSummary, ComboResults, RunResults, Suite,
};

// Re-export the engine types
pub use pacebench_core::{
    AccuracySettings, BenchError, Calibration, IterationSample, Measured, NoopObserver,
    ProgressObserver, RunContext,
};

// Re-export statistics and grouping
pub use pacebench_stats::{
    Comparison, EqualityGroup, GroupAssignment, Summary, group_by_equality, summarize,
    value_equality,
};

// Re-export reporting
pub use pacebench_report::{
    ConsoleProgress, Report, format_duration, generate_json_report, render_human,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        AccuracySettings, Comparison, ConsoleProgress, ParamSet, ParamValue, Suite,
    };
}
