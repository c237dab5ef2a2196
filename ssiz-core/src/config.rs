//! Run Configuration
//!
//! Analysis settings can be specified in an `ssiz.toml` file, discovered by
//! walking up from the current directory, or built programmatically. Every
//! field has a default so a partial file is fine.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::aggregate::ThresholdFilter;
use crate::event::EventType;
use crate::resample::ResamplingMode;

/// Settings for one sample-size analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SsizConfig {
    /// Simulations per (segment, sample-size) combination.
    #[serde(default = "default_simulations")]
    pub simulations: usize,
    /// Base RNG seed; generator i is seeded `seed + i`.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Resampling mode: "with-replacement" or "without-replacement".
    #[serde(default)]
    pub resampling: ResamplingMode,
    /// Threshold filter applied to per-year fire counts.
    #[serde(default)]
    pub threshold: ThresholdFilter,
    /// Event class to analyze.
    #[serde(default)]
    pub event_type: EventType,
    /// Restrict the analysis range to years covered by every series.
    #[serde(default)]
    pub common_years_only: bool,
    /// Drop series that never record an event.
    #[serde(default)]
    pub events_only: bool,
}

impl Default for SsizConfig {
    fn default() -> Self {
        Self {
            simulations: default_simulations(),
            seed: default_seed(),
            resampling: ResamplingMode::default(),
            threshold: ThresholdFilter::default(),
            event_type: EventType::default(),
            common_years_only: false,
            events_only: false,
        }
    }
}

fn default_simulations() -> usize {
    1000
}
fn default_seed() -> u64 {
    1000
}

impl SsizConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Discover and load an `ssiz.toml` by walking up from the current
    /// directory.
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("ssiz.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// A default configuration as a TOML template.
    pub fn default_toml() -> String {
        r#"# SSIZ analysis configuration

# Simulations per (segment, sample-size) combination
simulations = 1000
# Base RNG seed; generator i is seeded seed + i
seed = 1000
# Resampling mode: "with-replacement" or "without-replacement"
resampling = "with-replacement"
# Event class: "fire-scar", "other-injury", or "fire-and-injury"
event_type = "fire-scar"
# Restrict the analysis range to years covered by every series
common_years_only = false
# Drop series that never record an event
events_only = false

# Threshold filter on per-year fire counts (uncomment to enable)
# threshold = { kind = "number-of-events", value = 2.0 }
# threshold = { kind = "percentage-of-events", value = 25.0 }
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SsizConfig::default();
        assert_eq!(config.simulations, 1000);
        assert_eq!(config.seed, 1000);
        assert_eq!(config.resampling, ResamplingMode::WithReplacement);
        assert_eq!(config.threshold, ThresholdFilter::None);
        assert!(!config.common_years_only);
    }

    #[test]
    fn test_parse_partial_toml_keeps_defaults() {
        let toml_str = r#"
            simulations = 250
            resampling = "without-replacement"
        "#;

        let config: SsizConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.simulations, 250);
        assert_eq!(config.resampling, ResamplingMode::WithoutReplacement);
        // Defaults still apply
        assert_eq!(config.seed, 1000);
        assert_eq!(config.event_type, EventType::FireScar);
    }

    #[test]
    fn test_parse_threshold_variants() {
        let config: SsizConfig =
            toml::from_str(r#"threshold = { kind = "number-of-events", value = 2.0 }"#).unwrap();
        assert_eq!(config.threshold, ThresholdFilter::NumberOfEvents(2.0));

        let config: SsizConfig =
            toml::from_str(r#"threshold = { kind = "percentage-of-events", value = 25.0 }"#)
                .unwrap();
        assert_eq!(config.threshold, ThresholdFilter::PercentageOfEvents(25.0));
    }

    #[test]
    fn test_default_toml_parses() {
        let config: SsizConfig = toml::from_str(&SsizConfig::default_toml()).unwrap();
        assert_eq!(config.simulations, 1000);
        assert_eq!(config.event_type, EventType::FireScar);
    }
}
