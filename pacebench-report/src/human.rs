//! Output Formatting
//!
//! Human-readable terminal output: one aligned table per parameter
//! combination with median, spread, equality group and baseline-relative
//! ratio per candidate, failures listed with their messages, and a run
//! summary footer.

use crate::report::{CandidateStatus, Report};

/// Format a nanosecond duration with an appropriate unit.
pub fn format_duration(ns: f64) -> String {
    if ns < 1_000.0 {
        format!("{:.0} ns", ns)
    } else if ns < 1_000_000.0 {
        format!("{:.2} µs", ns / 1_000.0)
    } else if ns < 1_000_000_000.0 {
        format!("{:.2} ms", ns / 1_000_000.0)
    } else {
        format!("{:.2} s", ns / 1_000_000_000.0)
    }
}

/// Format a report for human-readable terminal display.
pub fn render_human(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str(&format!("PaceBench Results: {}\n", report.meta.suite));
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    for combo in &report.combos {
        if !combo.parameters.is_empty() {
            let label: Vec<String> = combo
                .parameters
                .iter()
                .map(|p| format!("{}={}", p.name, p.value))
                .collect();
            output.push_str(&format!("Parameters: {}\n", label.join(", ")));
            output.push_str(&"-".repeat(60));
            output.push('\n');
        }

        // Align on the longest method name
        let name_width = combo
            .candidates
            .iter()
            .map(|c| c.method.len())
            .max()
            .unwrap_or(10)
            .max(10);

        output.push_str(&format!(
            "  {:<width$}  {:>12}  {:>12}  {:>8}  {:>5}\n",
            "Method",
            "Median",
            "StdDev",
            "Ratio",
            "Group",
            width = name_width + 2
        ));
        output.push_str(&format!("  {}\n", "-".repeat(name_width + 48)));

        for candidate in &combo.candidates {
            match candidate.status {
                CandidateStatus::Measured => {
                    let median = candidate.median_ns.map(format_duration).unwrap_or_default();
                    let std_dev = candidate
                        .std_dev_ns
                        .map(format_duration)
                        .unwrap_or_default();
                    let ratio = candidate
                        .ratio
                        .map(|r| format!("{:.2}x", r))
                        .unwrap_or_default();
                    let group = candidate
                        .group_id
                        .map(|g| g.to_string())
                        .unwrap_or_default();
                    let marker = if candidate.is_baseline {
                        "  (baseline)"
                    } else {
                        ""
                    };

                    output.push_str(&format!(
                        "  ✓ {:<width$}  {:>12}  {:>12}  {:>8}  {:>5}{}\n",
                        candidate.method,
                        median,
                        std_dev,
                        ratio,
                        group,
                        marker,
                        width = name_width
                    ));
                }
                CandidateStatus::Failed => {
                    output.push_str(&format!(
                        "  ✗ {:<width$}  failed: {}\n",
                        candidate.method,
                        candidate.error.as_deref().unwrap_or("unknown failure"),
                        width = name_width
                    ));
                }
            }
        }

        // Flag calibration fallbacks so slow numbers can be read with care
        let unconverged: Vec<&str> = combo
            .candidates
            .iter()
            .filter(|c| c.status == CandidateStatus::Measured && !c.calibration_converged)
            .map(|c| c.method.as_str())
            .collect();
        if !unconverged.is_empty() {
            output.push_str(&format!(
                "  note: calibration did not converge for: {}\n",
                unconverged.join(", ")
            ));
        }

        output.push('\n');
    }

    output.push_str("Summary\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  Candidates: {}  Measured: {}  Failed: {}\n",
        report.summary.total_candidates, report.summary.measured, report.summary.failed
    ));
    output.push_str(&format!(
        "  Duration: {:.2} ms\n",
        report.summary.total_duration_ms
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{
        CandidateReport, ComboReport, GroupReport, Parameter, ReportMeta, RunSummary, SettingsEcho,
    };

    fn sample_report() -> Report {
        Report {
            meta: ReportMeta {
                suite: "sorting".to_string(),
                timestamp: chrono::Utc::now(),
                settings: SettingsEcho {
                    warmup_count: 10,
                    target_iteration_time_ns: 20_000_000,
                    iteration_count: 10,
                    subtract_overhead: true,
                    fixed_invocation_count: None,
                },
            },
            combos: vec![ComboReport {
                parameters: vec![Parameter {
                    name: "size".to_string(),
                    value: "1000".to_string(),
                }],
                candidates: vec![
                    CandidateReport {
                        method: "std_sort".to_string(),
                        status: CandidateStatus::Measured,
                        median_ns: Some(1_230.0),
                        std_dev_ns: Some(50.0),
                        ratio: Some(1.0),
                        group_id: Some(0),
                        is_baseline: true,
                        invocation_count: Some(1000),
                        calibration_converged: true,
                        error: None,
                    },
                    CandidateReport {
                        method: "bubble_sort".to_string(),
                        status: CandidateStatus::Measured,
                        median_ns: Some(3_690.0),
                        std_dev_ns: Some(80.0),
                        ratio: Some(3.0),
                        group_id: Some(0),
                        is_baseline: false,
                        invocation_count: Some(300),
                        calibration_converged: true,
                        error: None,
                    },
                    CandidateReport {
                        method: "broken_sort".to_string(),
                        status: CandidateStatus::Failed,
                        median_ns: None,
                        std_dev_ns: None,
                        ratio: None,
                        group_id: None,
                        is_baseline: false,
                        invocation_count: None,
                        calibration_converged: true,
                        error: Some("index out of bounds".to_string()),
                    },
                ],
                groups: vec![GroupReport {
                    id: 0,
                    baseline: "std_sort".to_string(),
                    members: vec!["std_sort".to_string(), "bubble_sort".to_string()],
                }],
            }],
            summary: RunSummary {
                total_candidates: 3,
                measured: 2,
                failed: 1,
                total_duration_ms: 412.5,
            },
        }
    }

    #[test]
    fn format_duration_selects_units() {
        assert_eq!(format_duration(450.0), "450 ns");
        assert_eq!(format_duration(1_230.0), "1.23 µs");
        assert_eq!(format_duration(2_500_000.0), "2.50 ms");
        assert_eq!(format_duration(1_500_000_000.0), "1.50 s");
    }

    #[test]
    fn render_contains_candidates_and_markers() {
        let output = render_human(&sample_report());

        assert!(output.contains("PaceBench Results: sorting"));
        assert!(output.contains("Parameters: size=1000"));
        assert!(output.contains("std_sort"));
        assert!(output.contains("(baseline)"));
        assert!(output.contains("3.00x"));
        assert!(output.contains("✗ broken_sort"));
        assert!(output.contains("index out of bounds"));
        assert!(output.contains("Candidates: 3  Measured: 2  Failed: 1"));
    }

    #[test]
    fn render_flags_unconverged_calibration() {
        let mut report = sample_report();
        report.combos[0].candidates[1].calibration_converged = false;

        let output = render_human(&report);

        assert!(output.contains("calibration did not converge"));
        assert!(output.contains("bubble_sort"));
    }
}
