//! Telemetry row model

use crate::error::ValidationError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Weather reported alongside each sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeatherCondition {
    #[default]
    Clear,
    Cloudy,
    Rainy,
}

impl WeatherCondition {
    /// All conditions in display order
    pub const ALL: [WeatherCondition; 3] = [
        WeatherCondition::Clear,
        WeatherCondition::Cloudy,
        WeatherCondition::Rainy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::Rainy => "Rainy",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeatherCondition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clear" => Ok(WeatherCondition::Clear),
            "cloudy" => Ok(WeatherCondition::Cloudy),
            "rainy" => Ok(WeatherCondition::Rainy),
            _ => Err(ValidationError::UnknownWeather(s.to_string())),
        }
    }
}

/// One sampled instant of flight state, defaulted and clamped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRow {
    pub timestamp: NaiveDateTime,
    pub altitude_ft: f64,
    pub speed_mph: f64,
    pub heart_rate_bpm: f64,
    /// Pilot fatigue in [0, 1]
    pub fatigue_score: f64,
    /// Precomputed fused risk in [0, 1]
    pub risk_score: f64,
    pub engine1_temp_c: f64,
    pub engine2_temp_c: f64,
    pub weather_condition: WeatherCondition,
    pub wind_speed_kt: f64,
    /// Turbulence intensity in [0, 1]
    pub turbulence: f64,
}

/// Canonical telemetry fields and the feed columns that map onto them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Timestamp,
    Altitude,
    Speed,
    HeartRate,
    Fatigue,
    Risk,
    Engine1Temp,
    Engine2Temp,
    Weather,
    WindSpeed,
    Turbulence,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::Timestamp,
        Field::Altitude,
        Field::Speed,
        Field::HeartRate,
        Field::Fatigue,
        Field::Risk,
        Field::Engine1Temp,
        Field::Engine2Temp,
        Field::Weather,
        Field::WindSpeed,
        Field::Turbulence,
    ];

    /// Name used in errors and logs
    pub fn name(&self) -> &'static str {
        match self {
            Field::Timestamp => "timestamp",
            Field::Altitude => "altitude_ft",
            Field::Speed => "speed_mph",
            Field::HeartRate => "heart_rate_bpm",
            Field::Fatigue => "fatigue_score",
            Field::Risk => "risk_score",
            Field::Engine1Temp => "engine1_temp_c",
            Field::Engine2Temp => "engine2_temp_c",
            Field::Weather => "weather_condition",
            Field::WindSpeed => "wind_speed_kt",
            Field::Turbulence => "turbulence",
        }
    }

    /// Map a feed column header to a field. Unknown columns yield `None`.
    pub fn from_column(column: &str) -> Option<Field> {
        let column = column.trim().to_ascii_lowercase();
        let field = match column.as_str() {
            "timestamp" => Field::Timestamp,
            "altitude" | "altitude_ft" => Field::Altitude,
            "speed" | "speed_mph" => Field::Speed,
            "heart_rate_bpm" | "heart_rate" => Field::HeartRate,
            "fatigue_score" => Field::Fatigue,
            "risk_score" => Field::Risk,
            "engine1_temp" | "engine1_temp_c" => Field::Engine1Temp,
            "engine2_temp" | "engine2_temp_c" => Field::Engine2Temp,
            "weather_condition" | "weather" => Field::Weather,
            "wind_speed" | "wind_speed_kt" => Field::WindSpeed,
            "turbulence" => Field::Turbulence,
            _ => return None,
        };
        Some(field)
    }
}

/// Unresolved row as read from the feed; every cell may be absent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTelemetryRow {
    values: HashMap<Field, String>,
}

impl RawTelemetryRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell value
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Builder form of [`RawTelemetryRow::set`]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Cell value, treating blank cells as absent
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values
            .get(&field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}
