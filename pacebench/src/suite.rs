//! Benchmark Suite
//!
//! Registration API and run loop. A suite owns a set of named methods, a
//! parameter grid and one immutable `AccuracySettings`; `run` measures every
//! method under every parameter combination, reduces the samples to
//! statistics, groups candidates by output equivalence per combination and
//! returns graded summaries.
//!
//! Measurement is strictly sequential — one candidate, one iteration at a
//! time — so candidates never bias each other through cache pollution or
//! scheduler contention. Only the post-hoc statistics reduction runs in
//! parallel.

use crate::params::{ParamGrid, ParamSet, ParamValue};
use chrono::{DateTime, Utc};
use fxhash::FxHashSet;
use pacebench_core::{
    AccuracySettings, BenchError, Measured, NoopObserver, ProgressObserver, RunContext, measure,
};
use pacebench_report::{
    CandidateReport, CandidateStatus, ComboReport, GroupReport, Parameter, Report, ReportMeta,
    RunSummary, SettingsEcho,
};
use pacebench_stats::{
    Comparison, EqualityGroup, Summary, group_by_equality, summarize, value_equality,
};
use rayon::prelude::*;
use regex::Regex;
use std::time::{Duration, Instant};

/// One registered candidate routine.
struct BenchmarkMethod<T> {
    name: String,
    callable: Box<dyn FnMut(&ParamSet) -> T>,
}

/// A benchmark suite: named candidate routines plus a parameter grid,
/// measured under one shared accuracy configuration.
pub struct Suite<T> {
    name: String,
    methods: Vec<BenchmarkMethod<T>>,
    grid: ParamGrid,
    settings: AccuracySettings,
    comparator: Box<dyn Fn(&T, &T) -> Comparison>,
    observer: Box<dyn ProgressObserver>,
    filter: Option<Regex>,
}

impl<T: PartialEq + 'static> Suite<T> {
    /// Create a suite whose results are compared by value equality.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_comparator(name, value_equality)
    }
}

impl<T> Suite<T> {
    /// Create a suite with an injected result comparator (e.g. tolerance
    /// comparison for numeric output).
    pub fn with_comparator(
        name: impl Into<String>,
        comparator: impl Fn(&T, &T) -> Comparison + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            grid: ParamGrid::default(),
            settings: AccuracySettings::default(),
            comparator: Box::new(comparator),
            observer: Box::new(NoopObserver),
            filter: None,
        }
    }

    /// Replace the accuracy settings for this run.
    pub fn settings(&mut self, settings: AccuracySettings) -> &mut Self {
        self.settings = settings;
        self
    }

    /// Install a progress observer (e.g. a console progress bar).
    pub fn observer(&mut self, observer: impl ProgressObserver + 'static) -> &mut Self {
        self.observer = Box::new(observer);
        self
    }

    /// Only measure methods whose name matches the pattern.
    pub fn filter(&mut self, pattern: &str) -> Result<&mut Self, BenchError> {
        let regex = Regex::new(pattern)
            .map_err(|e| BenchError::Configuration(format!("invalid filter pattern: {}", e)))?;
        self.filter = Some(regex);
        Ok(self)
    }

    /// Add a parameter axis; the run enumerates the cross product of all
    /// axes.
    pub fn param<V: Into<ParamValue>>(
        &mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        self.grid
            .add(name, values.into_iter().map(Into::into).collect());
        self
    }

    /// Register a named candidate routine. The callable receives the bound
    /// parameter combination; the measurement core only ever sees a
    /// zero-argument closure.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        callable: impl FnMut(&ParamSet) -> T + 'static,
    ) -> &mut Self {
        self.methods.push(BenchmarkMethod {
            name: name.into(),
            callable: Box::new(callable),
        });
        self
    }

    /// Measure every registered method under every parameter combination.
    ///
    /// Configuration problems fail the run before any measurement. A
    /// candidate that panics is omitted from its combination's summaries and
    /// the run continues with the remaining candidates.
    pub fn run(&mut self) -> Result<RunResults<T>, BenchError> {
        self.settings.validate()?;

        let mut seen = FxHashSet::default();
        for method in &self.methods {
            if !seen.insert(method.name.as_str()) {
                return Err(BenchError::Configuration(format!(
                    "duplicate method name '{}'",
                    method.name
                )));
            }
        }

        let combos = self.grid.combinations()?;
        let selected: Vec<usize> = (0..self.methods.len())
            .filter(|&i| match &self.filter {
                Some(regex) => regex.is_match(&self.methods[i].name),
                None => true,
            })
            .collect();

        if selected.is_empty() {
            tracing::warn!(suite = %self.name, "no methods to measure");
        }

        let total = combos.len() * selected.len();
        let mut ctx = RunContext::new();
        let run_start = Instant::now();
        let mut completed = 0usize;
        let mut combo_results = Vec::with_capacity(combos.len());

        for combo in &combos {
            let mut raw: Vec<Result<Measured<T>, CandidateFailure>> =
                Vec::with_capacity(selected.len());

            for &index in &selected {
                let name = self.methods[index].name.clone();
                let callable = &mut self.methods[index].callable;

                let outcome = measure(
                    &name,
                    || callable(combo),
                    &self.settings,
                    &mut ctx,
                    self.observer.as_ref(),
                );

                completed += 1;
                let percent = completed as f64 * 100.0 / total.max(1) as f64;
                self.observer
                    .candidate_completed(&name, percent, run_start.elapsed());

                match outcome {
                    Ok(measured) => raw.push(Ok(measured)),
                    Err(BenchError::Invocation { name, message }) => {
                        tracing::warn!(
                            candidate = %name,
                            %message,
                            "candidate failed; omitting from report"
                        );
                        raw.push(Err(CandidateFailure {
                            method: name,
                            message,
                        }));
                    }
                    Err(fatal) => return Err(fatal),
                }
            }

            combo_results.push(self.grade_combo(combo, raw));
        }

        Ok(RunResults {
            suite: self.name.clone(),
            timestamp: Utc::now(),
            settings: self.settings.clone(),
            total_duration: run_start.elapsed(),
            combos: combo_results,
        })
    }

    /// Reduce one combination's measurements to graded summaries: statistics
    /// in parallel, then equality grouping over the successful candidates.
    fn grade_combo(
        &self,
        combo: &ParamSet,
        raw: Vec<Result<Measured<T>, CandidateFailure>>,
    ) -> ComboResults<T> {
        let sample_sets: Vec<Vec<f64>> = raw
            .iter()
            .filter_map(|r| r.as_ref().ok())
            .map(|m| {
                m.samples
                    .iter()
                    .map(|s| s.average.as_nanos() as f64)
                    .collect()
            })
            .collect();
        let summaries: Vec<Summary> = sample_sets.par_iter().map(|s| summarize(s)).collect();

        let measured: Vec<&Measured<T>> = raw.iter().filter_map(|r| r.as_ref().ok()).collect();
        let results: Vec<&T> = measured.iter().map(|m| &m.call_result).collect();
        let medians: Vec<f64> = summaries.iter().map(|s| s.median).collect();
        let grouping = group_by_equality(&results, &medians, self.comparator.as_ref());

        let mut outcomes = Vec::with_capacity(raw.len());
        let mut measured_index = 0usize;
        for entry in raw {
            match entry {
                Ok(measured) => {
                    let summary = summaries[measured_index];
                    let assignment = grouping.assignments[measured_index];
                    measured_index += 1;
                    outcomes.push(CandidateOutcome::Measured(CandidateSummary {
                        method: measured.name,
                        parameters: combo.clone(),
                        median: Duration::from_nanos(summary.median.round() as u64),
                        std_dev: Duration::from_nanos(summary.std_dev.round() as u64),
                        call_result: measured.call_result,
                        group_id: assignment.group_id,
                        ratio: assignment.ratio,
                        is_baseline: assignment.is_baseline,
                        invocation_count: measured.invocation_count,
                        calibration_converged: measured.calibration_converged,
                    }));
                }
                Err(failure) => outcomes.push(CandidateOutcome::Failed(failure)),
            }
        }

        ComboResults {
            parameters: combo.clone(),
            outcomes,
            groups: grouping.groups,
        }
    }
}

/// A candidate whose invocation failed; no statistics are reported for it.
#[derive(Debug, Clone)]
pub struct CandidateFailure {
    /// Method name
    pub method: String,
    /// Panic payload rendered as text
    pub message: String,
}

/// Graded record for one measured candidate. Produced after the grouping
/// pass; immutable from then on.
#[derive(Debug, Clone)]
pub struct CandidateSummary<T> {
    /// Method name
    pub method: String,
    /// Parameter combination the candidate ran under
    pub parameters: ParamSet,
    /// Median per-invocation duration
    pub median: Duration,
    /// Population standard deviation of the iteration samples
    pub std_dev: Duration,
    /// Output captured from the representative invocation
    pub call_result: T,
    /// Equality group this candidate belongs to
    pub group_id: usize,
    /// Median relative to the group baseline (baseline = 1.00)
    pub ratio: f64,
    /// Whether this candidate is its group's baseline
    pub is_baseline: bool,
    /// Invocations per measured iteration
    pub invocation_count: u64,
    /// False when calibration fell back to its last tried count
    pub calibration_converged: bool,
}

/// Per-candidate outcome in execution order.
#[derive(Debug, Clone)]
pub enum CandidateOutcome<T> {
    /// Measured, summarised and graded
    Measured(CandidateSummary<T>),
    /// Invocation failed; omitted from statistics and grouping
    Failed(CandidateFailure),
}

/// Results for one parameter combination.
#[derive(Debug, Clone)]
pub struct ComboResults<T> {
    /// The bound combination (empty for unparameterized suites)
    pub parameters: ParamSet,
    /// Candidate outcomes in execution order
    pub outcomes: Vec<CandidateOutcome<T>>,
    /// Equality groups in discovery order; member indices refer to the
    /// measured candidates in execution order
    pub groups: Vec<EqualityGroup>,
}

impl<T> ComboResults<T> {
    /// Graded summaries in execution order.
    pub fn summaries(&self) -> impl Iterator<Item = &CandidateSummary<T>> {
        self.outcomes.iter().filter_map(|o| match o {
            CandidateOutcome::Measured(summary) => Some(summary),
            CandidateOutcome::Failed(_) => None,
        })
    }

    /// Failed candidates in execution order.
    pub fn failures(&self) -> impl Iterator<Item = &CandidateFailure> {
        self.outcomes.iter().filter_map(|o| match o {
            CandidateOutcome::Measured(_) => None,
            CandidateOutcome::Failed(failure) => Some(failure),
        })
    }
}

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct RunResults<T> {
    /// Suite name
    pub suite: String,
    /// UTC time the run finished
    pub timestamp: DateTime<Utc>,
    /// Settings the run used
    pub settings: AccuracySettings,
    /// Wall-clock duration of the whole run
    pub total_duration: Duration,
    /// Per-combination results in enumeration order
    pub combos: Vec<ComboResults<T>>,
}

impl<T> RunResults<T> {
    /// Convert to the serializable report model consumed by the renderers.
    pub fn to_report(&self) -> Report {
        let mut total_candidates = 0usize;
        let mut measured = 0usize;
        let mut failed = 0usize;

        let combos = self
            .combos
            .iter()
            .map(|combo| {
                let parameters = combo
                    .parameters
                    .iter()
                    .map(|(name, value)| Parameter {
                        name: name.to_string(),
                        value: value.to_string(),
                    })
                    .collect();

                let candidates = combo
                    .outcomes
                    .iter()
                    .map(|outcome| {
                        total_candidates += 1;
                        match outcome {
                            CandidateOutcome::Measured(s) => {
                                measured += 1;
                                CandidateReport {
                                    method: s.method.clone(),
                                    status: CandidateStatus::Measured,
                                    median_ns: Some(s.median.as_nanos() as f64),
                                    std_dev_ns: Some(s.std_dev.as_nanos() as f64),
                                    ratio: Some(s.ratio),
                                    group_id: Some(s.group_id),
                                    is_baseline: s.is_baseline,
                                    invocation_count: Some(s.invocation_count),
                                    calibration_converged: s.calibration_converged,
                                    error: None,
                                }
                            }
                            CandidateOutcome::Failed(f) => {
                                failed += 1;
                                CandidateReport {
                                    method: f.method.clone(),
                                    status: CandidateStatus::Failed,
                                    median_ns: None,
                                    std_dev_ns: None,
                                    ratio: None,
                                    group_id: None,
                                    is_baseline: false,
                                    invocation_count: None,
                                    calibration_converged: true,
                                    error: Some(f.message.clone()),
                                }
                            }
                        }
                    })
                    .collect();

                let names: Vec<&CandidateSummary<T>> = combo.summaries().collect();
                let groups = combo
                    .groups
                    .iter()
                    .map(|g| GroupReport {
                        id: g.id,
                        baseline: names[g.baseline].method.clone(),
                        members: g.members.iter().map(|&m| names[m].method.clone()).collect(),
                    })
                    .collect();

                ComboReport {
                    parameters,
                    candidates,
                    groups,
                }
            })
            .collect();

        Report {
            meta: ReportMeta {
                suite: self.suite.clone(),
                timestamp: self.timestamp,
                settings: SettingsEcho::from(&self.settings),
            },
            combos,
            summary: RunSummary {
                total_candidates,
                measured,
                failed,
                total_duration_ms: self.total_duration.as_secs_f64() * 1000.0,
            },
        }
    }

    /// Render the human-readable comparison tables.
    pub fn render(&self) -> String {
        pacebench_report::render_human(&self.to_report())
    }
}
