#![warn(missing_docs)]
//! PaceBench Report - Rendering and Output
//!
//! Consumes the candidate summaries produced by a run and renders them:
//! - Human-readable comparison tables with per-group ratios
//! - JSON (machine-readable)
//! - Console progress bar implementing the core observer seam

mod human;
mod json;
mod progress;
mod report;

pub use human::{format_duration, render_human};
pub use json::generate_json_report;
pub use progress::ConsoleProgress;
pub use report::{
    CandidateReport, CandidateStatus, ComboReport, GroupReport, Parameter, Report, ReportMeta,
    RunSummary, SettingsEcho,
};
