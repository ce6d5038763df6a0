//! # Simulation Configuration
//!
//! Every tuning constant of the match engine lives here so the balance can be
//! changed without touching the simulation's control flow.
//!
//! ## Usage
//! ```rust
//! use fm_core::engine::config::SimulationConfig;
//!
//! let config = SimulationConfig::default();
//! let neutral = SimulationConfig::neutral();
//! assert_eq!(neutral.home_advantage, 0.0);
//! assert!(config.validate().is_ok());
//! ```

mod position_bonus;

pub use position_bonus::PositionBonus;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === Match Clock ===
    /// Simulated match length in minutes (default: 90)
    pub duration_minutes: u8,
    /// Segment width in minutes; must divide the duration (default: 15)
    pub segment_minutes: u8,

    // === Goal Probability ===
    /// Goals already scored are divided by this and added to each draw,
    /// damping further scoring (default: 7.0)
    pub damping_divisor: f64,
    /// Subtracted from the home side's draw (default: 0.15)
    pub home_advantage: f64,
    /// Base probability used for both sides when neither has any power (default: 0.5)
    pub zero_power_share: f64,

    // === Scorer Selection ===
    pub position_bonus: PositionBonus,
    /// Inclusive lower bound of the random scorer-weight roll (default: 10)
    pub scorer_roll_min: u32,
    /// Inclusive upper bound of the random scorer-weight roll (default: 100)
    pub scorer_roll_max: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            duration_minutes: 90,
            segment_minutes: 15,

            damping_divisor: 7.0,
            home_advantage: 0.15,
            zero_power_share: 0.5,

            position_bonus: PositionBonus::default(),
            scorer_roll_min: 10,
            scorer_roll_max: 100,
        }
    }
}

impl SimulationConfig {
    pub fn realistic() -> Self {
        Self::default()
    }

    /// Neutral venue: no home advantage.
    pub fn neutral() -> Self {
        Self { home_advantage: 0.0, ..Self::default() }
    }

    pub fn segment_count(&self) -> u8 {
        self.duration_minutes / self.segment_minutes
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.segment_minutes == 0
            || self.duration_minutes == 0
            || self.duration_minutes % self.segment_minutes != 0
        {
            return Err(ConfigError::InvalidSegment {
                duration: self.duration_minutes,
                segment: self.segment_minutes,
            });
        }

        if !(self.damping_divisor.is_finite() && self.damping_divisor > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "damping_divisor",
                reason: format!("must be positive, got {}", self.damping_divisor),
            });
        }

        if !(self.home_advantage.is_finite() && (0.0..=1.0).contains(&self.home_advantage)) {
            return Err(ConfigError::InvalidParameter {
                name: "home_advantage",
                reason: format!("must be within [0, 1], got {}", self.home_advantage),
            });
        }

        if !(0.0..=1.0).contains(&self.zero_power_share) {
            return Err(ConfigError::InvalidParameter {
                name: "zero_power_share",
                reason: format!("must be within [0, 1], got {}", self.zero_power_share),
            });
        }

        if !self.position_bonus.is_monotonic() {
            return Err(ConfigError::InvalidParameter {
                name: "position_bonus",
                reason: "must increase goalkeeper < defender < midfielder < forward".to_string(),
            });
        }

        if self.scorer_roll_min > self.scorer_roll_max {
            return Err(ConfigError::InvalidParameter {
                name: "scorer_roll_min",
                reason: format!(
                    "roll range {}..={} is empty",
                    self.scorer_roll_min, self.scorer_roll_max
                ),
            });
        }

        Ok(())
    }

    /// Parse and validate a YAML document. Missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&content)?;
        tracing::info!(path = %path.as_ref().display(), "loaded simulation config");
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let cfg = SimulationConfig::default();
        assert_eq!(cfg.duration_minutes, 90);
        assert_eq!(cfg.segment_count(), 6);
        assert!((cfg.damping_divisor - 7.0).abs() < f64::EPSILON);
        assert!((cfg.home_advantage - 0.15).abs() < f64::EPSILON);
        assert!((cfg.zero_power_share - 0.5).abs() < f64::EPSILON);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_neutral_only_drops_home_advantage() {
        let neutral = SimulationConfig::neutral();
        let realistic = SimulationConfig::realistic();
        assert_eq!(neutral.home_advantage, 0.0);
        assert_eq!(neutral.damping_divisor, realistic.damping_divisor);
        assert_eq!(neutral.position_bonus, realistic.position_bonus);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
home_advantage: 0.05
position_bonus:
  forward: 200
"#;
        let cfg = SimulationConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.home_advantage, 0.05);
        assert_eq!(cfg.position_bonus.forward, 200);
        assert_eq!(cfg.position_bonus.midfielder, 110);
        assert_eq!(cfg.segment_minutes, 15);
    }

    #[test]
    fn test_segment_must_divide_duration() {
        let cfg = SimulationConfig { segment_minutes: 20, ..SimulationConfig::default() };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidSegment { duration: 90, segment: 20 })
        ));

        let cfg = SimulationConfig { segment_minutes: 0, ..SimulationConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let cases = [
            SimulationConfig { damping_divisor: 0.0, ..SimulationConfig::default() },
            SimulationConfig { home_advantage: -0.1, ..SimulationConfig::default() },
            SimulationConfig { zero_power_share: 1.5, ..SimulationConfig::default() },
            SimulationConfig { scorer_roll_min: 50, scorer_roll_max: 10, ..SimulationConfig::default() },
            SimulationConfig {
                position_bonus: PositionBonus { goalkeeper: 200, ..PositionBonus::default() },
                ..SimulationConfig::default()
            },
        ];
        for cfg in cases {
            assert!(
                matches!(cfg.validate(), Err(ConfigError::InvalidParameter { .. })),
                "{:?} should be rejected",
                cfg
            );
        }
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        assert!(matches!(
            SimulationConfig::from_yaml_str("duration_minutes: [1, 2]"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_yaml_roundtrip_and_file_loading() {
        let cfg = SimulationConfig::neutral();
        let yaml = cfg.to_yaml_string().unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let loaded = SimulationConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SimulationConfig::from_file(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
