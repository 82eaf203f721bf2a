//! Dashboard settings
//!
//! Loaded from an optional config file, then `AEROSAFE__*` environment
//! variables (e.g. `AEROSAFE__RISK_THRESHOLD_PCT=60`,
//! `AEROSAFE__SOURCE__KIND=sample`).

use config::{Config, Environment, File};
use risk_classifier::{ConfigError, ThresholdConfig, DEFAULT_RISK_THRESHOLD_PCT};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use telemetry_source::{
    FallbackSource, FileSource, HttpSource, SampleSource, SourceError, TelemetrySource,
    DEFAULT_SAMPLE_ROWS, DEFAULT_SAMPLE_SEED,
};
use thiserror::Error;
use tracing::info;

/// Published fused-risk sample feed
pub const DEFAULT_FEED_URL: &str = "https://raw.githubusercontent.com/GohelR/VOIS_AeroSafe-AI-Triple-Fusion-Flight-Guardian-/main/data/fused_risk_sample.csv";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error(transparent)]
    Threshold(#[from] ConfigError),

    #[error("{field} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error("source.location is required for {0:?} sources")]
    MissingLocation(SourceKind),

    #[error("Failed to build telemetry source: {0}")]
    Source(#[from] SourceError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Http,
    File,
    Sample,
}

/// Where telemetry batches come from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub kind: SourceKind,
    /// URL for `http`, path for `file`
    pub location: Option<String>,
    /// Serve generated sample data when the feed fails
    pub fallback_to_sample: bool,
    pub timeout_seconds: u64,
    pub seed: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::Http,
            location: Some(DEFAULT_FEED_URL.to_string()),
            fallback_to_sample: true,
            timeout_seconds: 10,
            seed: DEFAULT_SAMPLE_SEED,
        }
    }
}

/// Operator session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Risk alert threshold (%)
    pub risk_threshold_pct: u32,
    pub refresh_interval_seconds: u64,
    /// Trailing rows shown in charts
    pub display_window: usize,
    pub auto_refresh: bool,
    pub bind_addr: String,
    pub log_level: String,
    pub log_json: bool,
    pub flight_id: String,
    pub route: String,
    pub source: SourceSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            risk_threshold_pct: u32::from(DEFAULT_RISK_THRESHOLD_PCT),
            refresh_interval_seconds: 3,
            display_window: 50,
            auto_refresh: true,
            bind_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            log_json: false,
            flight_id: "AI-501".to_string(),
            route: "Rajkot (RJT) → Delhi (DEL)".to_string(),
            source: SourceSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from an optional file plus environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(
                Environment::with_prefix("AEROSAFE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Check operator ranges
    pub fn validate(&self) -> Result<(), SettingsError> {
        ThresholdConfig::new(self.risk_threshold_pct)?;
        check_range("refresh_interval_seconds", self.refresh_interval_seconds, 1, 10)?;
        check_range("display_window", self.display_window as u64, 10, 100)?;
        check_range("source.timeout_seconds", self.source.timeout_seconds, 1, 120)?;

        if self.source.kind != SourceKind::Sample && self.source.location.is_none() {
            return Err(SettingsError::MissingLocation(self.source.kind));
        }
        Ok(())
    }

    pub fn threshold(&self) -> Result<ThresholdConfig, SettingsError> {
        Ok(ThresholdConfig::new(self.risk_threshold_pct)?)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_seconds)
    }

    /// Build the configured telemetry source
    pub fn build_source(&self) -> Result<Box<dyn TelemetrySource>, SettingsError> {
        let source = &self.source;
        let sample = || -> Box<dyn TelemetrySource> {
            Box::new(SampleSource::new(source.seed, DEFAULT_SAMPLE_ROWS))
        };

        let primary: Box<dyn TelemetrySource> = match (source.kind, source.location.as_deref()) {
            (SourceKind::Sample, _) => return Ok(sample()),
            (SourceKind::File, Some(path)) => Box::new(FileSource::new(path)),
            (SourceKind::Http, Some(url)) => Box::new(HttpSource::new(
                url,
                Duration::from_secs(source.timeout_seconds),
            )?),
            (kind, None) => return Err(SettingsError::MissingLocation(kind)),
        };

        info!("Telemetry source: {:?} {:?}", source.kind, source.location);
        if source.fallback_to_sample {
            Ok(Box::new(FallbackSource::new(primary, sample())))
        } else {
            Ok(primary)
        }
    }
}

fn check_range(field: &'static str, value: u64, min: u64, max: u64) -> Result<(), SettingsError> {
    if value < min || value > max {
        Err(SettingsError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    } else {
        Ok(())
    }
}
