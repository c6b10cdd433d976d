//! JSON Output

use crate::report::Report;

/// Generate a prettified JSON report.
///
/// Serializes the benchmark report into machine-readable JSON format.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ReportMeta, RunSummary, SettingsEcho};

    #[test]
    fn json_report_round_trips() {
        let report = Report {
            meta: ReportMeta {
                suite: "demo".to_string(),
                timestamp: chrono::Utc::now(),
                settings: SettingsEcho {
                    warmup_count: 0,
                    target_iteration_time_ns: 0,
                    iteration_count: 2,
                    subtract_overhead: false,
                    fixed_invocation_count: Some(1),
                },
            },
            combos: Vec::new(),
            summary: RunSummary::default(),
        };

        let json = generate_json_report(&report).expect("serializes");
        let parsed: Report = serde_json::from_str(&json).expect("parses back");
        assert_eq!(parsed.meta.suite, "demo");
        assert_eq!(parsed.meta.settings.iteration_count, 2);
    }
}
