//! Error Taxonomy
//!
//! Configuration problems are fatal and surface before any measurement runs.
//! Invocation failures abort only the failing candidate; the rest of the
//! suite proceeds. Calibration non-convergence is deliberately NOT an error:
//! the engine falls back to the last tried invocation count and records the
//! fact on the measurement (see `Calibration::converged`).

use thiserror::Error;

/// Errors surfaced by the measurement engine.
#[derive(Debug, Clone, Error)]
pub enum BenchError {
    /// Invalid accuracy settings or suite registration. No measurement is
    /// attempted.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The benchmarked callable panicked. The candidate's summary is
    /// omitted from the report; other candidates continue.
    #[error("candidate '{name}' failed during invocation: {message}")]
    Invocation {
        /// Name of the failing candidate
        name: String,
        /// Panic payload rendered as text
        message: String,
    },
}
