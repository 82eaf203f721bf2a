//! Flight Risk Classification
//!
//! Maps the latest telemetry row and the operator's threshold to a verdict,
//! a heart-rate zone, and an ordered set of alerts.

mod assessment;
mod classifier;
mod config;
mod insight;

pub use assessment::{
    AlertKind, AlertRecord, Assessment, EngineTempBand, HeartRateZone, RiskIndicator, Severity,
    Verdict,
};
pub use classifier::{classify, engine_band, heart_rate_zone, risk_indicator, verdict};
pub use config::{
    ConfigError, ThresholdConfig, DEFAULT_RISK_THRESHOLD_PCT, ENGINE_TEMP_HIGH_C, FATIGUE_HIGH,
    HEART_RATE_HIGH, HEART_RATE_LOW, TURBULENCE_HIGH,
};
pub use insight::{insight, Insight};
