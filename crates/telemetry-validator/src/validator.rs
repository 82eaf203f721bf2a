//! Row resolution: default substitution and clamping

use crate::error::ValidationError;
use crate::row::{Field, RawTelemetryRow, TelemetryRow, WeatherCondition};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Naive timestamp layouts accepted after RFC 3339 fails
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Values substituted for absent cells
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowDefaults {
    pub altitude_ft: f64,
    pub speed_mph: f64,
    pub heart_rate_bpm: f64,
    pub fatigue_score: f64,
    pub risk_score: f64,
    pub engine1_temp_c: f64,
    pub engine2_temp_c: f64,
    pub weather_condition: WeatherCondition,
    pub wind_speed_kt: f64,
    pub turbulence: f64,
}

impl Default for RowDefaults {
    fn default() -> Self {
        Self {
            altitude_ft: 35_000.0,
            speed_mph: 500.0,
            heart_rate_bpm: 75.0,
            fatigue_score: 0.3,
            risk_score: 0.2,
            engine1_temp_c: 450.0,
            engine2_temp_c: 445.0,
            weather_condition: WeatherCondition::Clear,
            wind_speed_kt: 15.0,
            turbulence: 0.2,
        }
    }
}

impl RowDefaults {
    /// A fully defaulted row at the given instant
    pub fn row_at(&self, timestamp: NaiveDateTime) -> TelemetryRow {
        TelemetryRow {
            timestamp,
            altitude_ft: self.altitude_ft,
            speed_mph: self.speed_mph,
            heart_rate_bpm: self.heart_rate_bpm,
            fatigue_score: self.fatigue_score,
            risk_score: self.risk_score,
            engine1_temp_c: self.engine1_temp_c,
            engine2_temp_c: self.engine2_temp_c,
            weather_condition: self.weather_condition,
            wind_speed_kt: self.wind_speed_kt,
            turbulence: self.turbulence,
        }
    }
}

/// Resolves raw feed rows into classifier-ready telemetry
pub struct Validator {
    defaults: RowDefaults,
}

impl Validator {
    /// Create a new validator with given defaults
    pub fn new(defaults: RowDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &RowDefaults {
        &self.defaults
    }

    /// Resolve a raw row, applying defaults and clamping unit-interval scores
    pub fn resolve(&self, raw: &RawTelemetryRow) -> Result<TelemetryRow, ValidationError> {
        let timestamp = raw
            .get(Field::Timestamp)
            .ok_or(ValidationError::MissingField(Field::Timestamp.name()))
            .and_then(parse_timestamp)?;

        let weather_condition = match raw.get(Field::Weather) {
            Some(label) => label.parse()?,
            None => self.defaults.weather_condition,
        };

        let d = &self.defaults;
        Ok(TelemetryRow {
            timestamp,
            altitude_ft: number_or(raw, Field::Altitude, d.altitude_ft)?,
            speed_mph: number_or(raw, Field::Speed, d.speed_mph)?,
            heart_rate_bpm: number_or(raw, Field::HeartRate, d.heart_rate_bpm)?,
            fatigue_score: unit_interval_or(raw, Field::Fatigue, d.fatigue_score)?,
            risk_score: unit_interval_or(raw, Field::Risk, d.risk_score)?,
            engine1_temp_c: number_or(raw, Field::Engine1Temp, d.engine1_temp_c)?,
            engine2_temp_c: number_or(raw, Field::Engine2Temp, d.engine2_temp_c)?,
            weather_condition,
            wind_speed_kt: number_or(raw, Field::WindSpeed, d.wind_speed_kt)?,
            turbulence: unit_interval_or(raw, Field::Turbulence, d.turbulence)?,
        })
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(RowDefaults::default())
    }
}

/// Parse a feed timestamp (RFC 3339 or naive `date time` forms)
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ValidationError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_utc());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: Field::Timestamp.name(),
            value: value.to_string(),
        })
}

fn number_or(raw: &RawTelemetryRow, field: Field, default: f64) -> Result<f64, ValidationError> {
    let Some(cell) = raw.get(field) else {
        return Ok(default);
    };
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::InvalidFormat {
            field: field.name(),
            value: cell.to_string(),
        }),
    }
}

fn unit_interval_or(
    raw: &RawTelemetryRow,
    field: Field,
    default: f64,
) -> Result<f64, ValidationError> {
    let value = number_or(raw, field, default)?;
    let clamped = value.clamp(0.0, 1.0);
    if clamped != value {
        debug!("Clamped {} from {} to {}", field.name(), value, clamped);
    }
    Ok(clamped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn raw_at(ts: &str) -> RawTelemetryRow {
        RawTelemetryRow::new().with(Field::Timestamp, ts)
    }

    #[test]
    fn test_all_defaults() {
        let validator = Validator::default();
        let row = validator.resolve(&raw_at("2025-01-01 00:00:00")).unwrap();

        assert_eq!(row.altitude_ft, 35_000.0);
        assert_eq!(row.speed_mph, 500.0);
        assert_eq!(row.heart_rate_bpm, 75.0);
        assert_eq!(row.fatigue_score, 0.3);
        assert_eq!(row.risk_score, 0.2);
        assert_eq!(row.engine1_temp_c, 450.0);
        assert_eq!(row.engine2_temp_c, 445.0);
        assert_eq!(row.weather_condition, WeatherCondition::Clear);
        assert_eq!(row.wind_speed_kt, 15.0);
        assert_eq!(row.turbulence, 0.2);
    }

    #[test]
    fn test_present_values_win_over_defaults() {
        let validator = Validator::default();
        let raw = raw_at("2025-01-01 00:05:00")
            .with(Field::Engine1Temp, "512.5")
            .with(Field::Weather, "Rainy")
            .with(Field::HeartRate, "104");
        let row = validator.resolve(&raw).unwrap();

        assert_eq!(row.engine1_temp_c, 512.5);
        assert_eq!(row.weather_condition, WeatherCondition::Rainy);
        assert_eq!(row.heart_rate_bpm, 104.0);
        assert_eq!(row.engine2_temp_c, 445.0);
    }

    #[test]
    fn test_scores_are_clamped() {
        let validator = Validator::default();
        let raw = raw_at("2025-01-01 00:00:00")
            .with(Field::Fatigue, "1.4")
            .with(Field::Risk, "-0.2")
            .with(Field::Turbulence, "0.5");
        let row = validator.resolve(&raw).unwrap();

        assert_eq!(row.fatigue_score, 1.0);
        assert_eq!(row.risk_score, 0.0);
        assert_eq!(row.turbulence, 0.5);
    }

    #[test]
    fn test_missing_timestamp() {
        let validator = Validator::default();
        let raw = RawTelemetryRow::new().with(Field::Risk, "0.5");
        assert_eq!(
            validator.resolve(&raw),
            Err(ValidationError::MissingField("timestamp"))
        );
    }

    #[test]
    fn test_non_numeric_rejected() {
        let validator = Validator::default();
        let raw = raw_at("2025-01-01 00:00:00").with(Field::Speed, "fast");
        assert!(matches!(
            validator.resolve(&raw),
            Err(ValidationError::InvalidFormat { field: "speed_mph", .. })
        ));

        let raw = raw_at("2025-01-01 00:00:00").with(Field::Risk, "NaN");
        assert!(matches!(
            validator.resolve(&raw),
            Err(ValidationError::InvalidFormat { field: "risk_score", .. })
        ));
    }

    #[test]
    fn test_timestamp_formats() {
        assert!(parse_timestamp("2025-01-01 00:01:00").is_ok());
        assert!(parse_timestamp("2025-01-01T00:01:00").is_ok());
        assert!(parse_timestamp("2025-01-01 00:01:00.250").is_ok());
        assert!(parse_timestamp("2025-01-01T00:01:00Z").is_ok());
        assert!(parse_timestamp("2025-01-01T05:31:00+05:30").is_ok());
        assert!(parse_timestamp("yesterday").is_err());

        let utc = parse_timestamp("2025-01-01T05:31:00+05:30").unwrap();
        assert_eq!(utc, parse_timestamp("2025-01-01 00:01:00").unwrap());
    }

    proptest! {
        #[test]
        fn prop_unit_scores_always_in_range(v in -10.0f64..10.0) {
            let validator = Validator::default();
            let raw = raw_at("2025-01-01 00:00:00")
                .with(Field::Fatigue, v.to_string())
                .with(Field::Risk, v.to_string())
                .with(Field::Turbulence, v.to_string());
            let row = validator.resolve(&raw).unwrap();
            prop_assert!((0.0..=1.0).contains(&row.fatigue_score));
            prop_assert!((0.0..=1.0).contains(&row.risk_score));
            prop_assert!((0.0..=1.0).contains(&row.turbulence));
        }
    }
}
