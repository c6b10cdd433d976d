//! Configuration loading from pace.toml
//!
//! Accuracy settings can be specified in a `pace.toml` file in the project
//! root, automatically discovered by walking up from the current directory.
//! The file names a preset and optionally overrides individual knobs;
//! `resolve` turns it into validated [`AccuracySettings`].

use pacebench_core::{AccuracySettings, BenchError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// PaceBench configuration file contents.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PaceConfig {
    /// Accuracy configuration
    #[serde(default)]
    pub accuracy: AccuracyConfig,
}

/// The `[accuracy]` table: a preset plus optional overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccuracyConfig {
    /// Preset name: "default", "fast" or "instant"
    #[serde(default = "default_preset")]
    pub preset: String,
    /// Override warmup invocation count
    #[serde(default)]
    pub warmup_count: Option<u32>,
    /// Override target iteration time (e.g. "100ms", "2s")
    #[serde(default)]
    pub target_iteration_time: Option<String>,
    /// Override measured iteration count
    #[serde(default)]
    pub iteration_count: Option<u32>,
    /// Override overhead subtraction
    #[serde(default)]
    pub subtract_overhead: Option<bool>,
    /// Pin invocations per iteration, bypassing calibration
    #[serde(default)]
    pub fixed_invocation_count: Option<u64>,
}

impl Default for AccuracyConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            warmup_count: None,
            target_iteration_time: None,
            iteration_count: None,
            subtract_overhead: None,
            fixed_invocation_count: None,
        }
    }
}

fn default_preset() -> String {
    "default".to_string()
}

impl PaceConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from the current
    /// directory.
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("pace.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Resolve the preset plus overrides into validated settings.
    pub fn resolve(&self) -> Result<AccuracySettings, BenchError> {
        let mut settings = match self.accuracy.preset.as_str() {
            "default" => AccuracySettings::default(),
            "fast" => AccuracySettings::fast(),
            "instant" => AccuracySettings::instant(),
            other => {
                return Err(BenchError::Configuration(format!(
                    "unknown accuracy preset '{}' (expected default, fast or instant)",
                    other
                )));
            }
        };

        if let Some(warmup) = self.accuracy.warmup_count {
            settings.warmup_count = warmup;
        }
        if let Some(target) = &self.accuracy.target_iteration_time {
            let nanos = Self::parse_duration(target)
                .map_err(|e| BenchError::Configuration(e.to_string()))?;
            settings.target_iteration_time = Duration::from_nanos(nanos);
        }
        if let Some(iterations) = self.accuracy.iteration_count {
            settings.iteration_count = iterations;
        }
        if let Some(subtract) = self.accuracy.subtract_overhead {
            settings.subtract_overhead = subtract;
        }
        if let Some(fixed) = self.accuracy.fixed_invocation_count {
            settings.fixed_invocation_count = Some(fixed);
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Generate a default configuration as a TOML string.
    pub fn default_toml() -> String {
        r#"# PaceBench Configuration

[accuracy]
# Accuracy preset: "default", "fast" or "instant"
preset = "default"
# Throwaway invocations before calibration (uncomment to override)
# warmup_count = 100
# Target duration of one timed iteration block
# target_iteration_time = "100ms"
# Measured iterations per candidate
# iteration_count = 30
# Subtract the no-op call overhead from measurements
# subtract_overhead = true
# Pin invocations per iteration, skipping calibration
# fixed_invocation_count = 1000
"#
        .to_string()
    }

    /// Parse a duration string (e.g. "3s", "500ms", "2m") to nanoseconds.
    pub fn parse_duration(s: &str) -> anyhow::Result<u64> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("empty duration string"));
        }

        // Find where the number ends and the unit begins
        let (num_part, unit_part) = s
            .char_indices()
            .find(|(_, c)| c.is_alphabetic())
            .map(|(i, _)| s.split_at(i))
            .unwrap_or((s, "s"));

        let value: f64 = num_part
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid duration number: {}", num_part))?;

        let multiplier: u64 = match unit_part.to_lowercase().as_str() {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" | "" => 1_000_000_000,
            "m" | "min" => 60_000_000_000,
            _ => return Err(anyhow::anyhow!("unknown duration unit: {}", unit_part)),
        };

        Ok((value * multiplier as f64) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_resolves_to_default_preset() {
        let config = PaceConfig::default();
        let settings = config.resolve().expect("valid config");
        assert_eq!(settings, AccuracySettings::default());
    }

    #[test]
    fn parse_duration_units() {
        assert_eq!(PaceConfig::parse_duration("3s").unwrap(), 3_000_000_000);
        assert_eq!(PaceConfig::parse_duration("500ms").unwrap(), 500_000_000);
        assert_eq!(PaceConfig::parse_duration("100us").unwrap(), 100_000);
        assert_eq!(PaceConfig::parse_duration("1000ns").unwrap(), 1000);
        assert_eq!(PaceConfig::parse_duration("2m").unwrap(), 120_000_000_000);
        assert_eq!(PaceConfig::parse_duration("1.5s").unwrap(), 1_500_000_000);
    }

    #[test]
    fn parse_duration_rejects_garbage() {
        assert!(PaceConfig::parse_duration("").is_err());
        assert!(PaceConfig::parse_duration("fast").is_err());
        assert!(PaceConfig::parse_duration("10parsecs").is_err());
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let toml_str = r#"
            [accuracy]
            preset = "fast"
            iteration_count = 25
            target_iteration_time = "50ms"
        "#;

        let config: PaceConfig = toml::from_str(toml_str).unwrap();
        let settings = config.resolve().expect("valid config");

        assert_eq!(settings.iteration_count, 25);
        assert_eq!(settings.target_iteration_time, Duration::from_millis(50));
        // Untouched knobs come from the preset
        assert_eq!(settings.warmup_count, AccuracySettings::fast().warmup_count);
    }

    #[test]
    fn unknown_preset_is_a_configuration_error() {
        let toml_str = r#"
            [accuracy]
            preset = "warp"
        "#;

        let config: PaceConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.resolve(),
            Err(BenchError::Configuration(_))
        ));
    }

    #[test]
    fn invalid_override_combination_is_rejected() {
        let toml_str = r#"
            [accuracy]
            preset = "fast"
            iteration_count = 0
        "#;

        let config: PaceConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.resolve(),
            Err(BenchError::Configuration(_))
        ));
    }

    #[test]
    fn default_toml_parses_and_resolves() {
        let config: PaceConfig = toml::from_str(&PaceConfig::default_toml()).unwrap();
        let settings = config.resolve().expect("valid config");
        assert_eq!(settings, AccuracySettings::default());
    }
}
