//! Threshold configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Engine temperature above which an engine alert is raised (°C)
pub const ENGINE_TEMP_HIGH_C: f64 = 500.0;
/// Fatigue score above which a fatigue alert is raised
pub const FATIGUE_HIGH: f64 = 0.7;
/// Turbulence above which a turbulence alert is raised
pub const TURBULENCE_HIGH: f64 = 0.7;
/// Heart rate below this is LOW (bpm)
pub const HEART_RATE_LOW: f64 = 60.0;
/// Heart rate at or above this is ELEVATED (bpm)
pub const HEART_RATE_HIGH: f64 = 100.0;
/// Risk score above this is a HIGH verdict
pub const VERDICT_HIGH_RISK: f64 = 0.7;
/// Risk score above this is a MODERATE verdict
pub const VERDICT_MODERATE_RISK: f64 = 0.4;

/// Default operator risk threshold (%)
pub const DEFAULT_RISK_THRESHOLD_PCT: u8 = 70;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Risk threshold {0}% is out of range [0, 100]")]
    ThresholdOutOfRange(u32),
}

/// Operator-tunable thresholds, fixed for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawThresholdConfig")]
pub struct ThresholdConfig {
    risk_threshold_pct: u8,
}

#[derive(Deserialize)]
struct RawThresholdConfig {
    risk_threshold_pct: u32,
}

impl TryFrom<RawThresholdConfig> for ThresholdConfig {
    type Error = ConfigError;

    fn try_from(raw: RawThresholdConfig) -> Result<Self, Self::Error> {
        Self::new(raw.risk_threshold_pct)
    }
}

impl ThresholdConfig {
    /// Create a config; the percentage must lie in [0, 100]
    pub fn new(risk_threshold_pct: u32) -> Result<Self, ConfigError> {
        if risk_threshold_pct > 100 {
            return Err(ConfigError::ThresholdOutOfRange(risk_threshold_pct));
        }
        Ok(Self {
            risk_threshold_pct: risk_threshold_pct as u8,
        })
    }

    pub fn risk_threshold_pct(&self) -> u8 {
        self.risk_threshold_pct
    }

    /// Threshold on the risk score's [0, 1] scale
    pub fn risk_threshold(&self) -> f64 {
        f64::from(self.risk_threshold_pct) / 100.0
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            risk_threshold_pct: DEFAULT_RISK_THRESHOLD_PCT,
        }
    }
}
