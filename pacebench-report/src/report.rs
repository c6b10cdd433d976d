//! Report Data Structures

use chrono::{DateTime, Utc};
use pacebench_core::AccuracySettings;
use serde::{Deserialize, Serialize};

/// Complete benchmark report for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Run metadata
    pub meta: ReportMeta,
    /// One section per parameter combination, in enumeration order
    pub combos: Vec<ComboReport>,
    /// Run totals
    pub summary: RunSummary,
}

/// Report metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Suite name
    pub suite: String,
    /// UTC time the report was produced
    pub timestamp: DateTime<Utc>,
    /// Accuracy settings the run used
    pub settings: SettingsEcho,
}

/// Accuracy settings echoed into the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsEcho {
    /// Warmup invocations before calibration
    pub warmup_count: u32,
    /// Target iteration time in nanoseconds
    pub target_iteration_time_ns: u64,
    /// Measured iterations per candidate
    pub iteration_count: u32,
    /// Whether no-op overhead was subtracted
    pub subtract_overhead: bool,
    /// Explicit invocations per iteration, if calibration was bypassed
    pub fixed_invocation_count: Option<u64>,
}

impl From<&AccuracySettings> for SettingsEcho {
    fn from(settings: &AccuracySettings) -> Self {
        Self {
            warmup_count: settings.warmup_count,
            target_iteration_time_ns: settings.target_iteration_time.as_nanos() as u64,
            iteration_count: settings.iteration_count,
            subtract_overhead: settings.subtract_overhead,
            fixed_invocation_count: settings.fixed_invocation_count,
        }
    }
}

/// One parameter name/value pair, value in display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Display form of the bound value
    pub value: String,
}

/// Results for one parameter combination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboReport {
    /// Bound parameters (empty for unparameterized suites)
    pub parameters: Vec<Parameter>,
    /// Candidate rows in registration order
    pub candidates: Vec<CandidateReport>,
    /// Equality groups in discovery order
    pub groups: Vec<GroupReport>,
}

/// Candidate execution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    /// Measured and summarised
    Measured,
    /// Invocation failed; no statistics reported
    Failed,
}

/// One candidate row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateReport {
    /// Method name
    pub method: String,
    /// Execution status
    pub status: CandidateStatus,
    /// Median invocation duration in nanoseconds
    pub median_ns: Option<f64>,
    /// Population standard deviation in nanoseconds
    pub std_dev_ns: Option<f64>,
    /// Median relative to the group baseline (baseline = 1.00)
    pub ratio: Option<f64>,
    /// Id of the equality group this candidate landed in
    pub group_id: Option<usize>,
    /// Whether this candidate is its group's baseline
    pub is_baseline: bool,
    /// Invocations per measured iteration
    pub invocation_count: Option<u64>,
    /// False when the calibration search fell back to its last tried count
    pub calibration_converged: bool,
    /// Failure message for failed candidates
    pub error: Option<String>,
}

/// One equality group listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupReport {
    /// Sequential id in discovery order
    pub id: usize,
    /// Baseline method name (lowest median in the group)
    pub baseline: String,
    /// Member method names in discovery order
    pub members: Vec<String>,
}

/// Run totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Candidates attempted (combinations x methods)
    pub total_candidates: usize,
    /// Candidates measured successfully
    pub measured: usize,
    /// Candidates whose invocation failed
    pub failed: usize,
    /// Wall-clock duration of the whole run in milliseconds
    pub total_duration_ms: f64,
}
