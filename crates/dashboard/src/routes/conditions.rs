//! Engine and Weather Routes

use axum::{extract::State, Json};
use risk_classifier::{engine_band, EngineTempBand, ENGINE_TEMP_HIGH_C};
use serde::Serialize;
use telemetry_validator::WeatherCondition;

use crate::{ApiError, SharedState};

/// Gauge reference temperature (°C)
const ENGINE_REFERENCE_C: f64 = 450.0;

#[derive(Debug, Serialize)]
pub struct EngineReading {
    pub temp_c: f64,
    pub band: EngineTempBand,
    pub delta_from_reference_c: f64,
}

impl EngineReading {
    fn new(temp_c: f64) -> Self {
        Self {
            temp_c,
            band: engine_band(temp_c),
            delta_from_reference_c: temp_c - ENGINE_REFERENCE_C,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EnginesResponse {
    pub engine1: EngineReading,
    pub engine2: EngineReading,
    pub alert_limit_c: f64,
}

/// Get engine temperatures of the latest row
pub async fn get_engines(State(state): State<SharedState>) -> Result<Json<EnginesResponse>, ApiError> {
    let state = state.read().await;
    let latest = state
        .batch()?
        .latest()
        .map_err(|_| ApiError::Unavailable("No telemetry rows available"))?;

    Ok(Json(EnginesResponse {
        engine1: EngineReading::new(latest.engine1_temp_c),
        engine2: EngineReading::new(latest.engine2_temp_c),
        alert_limit_c: ENGINE_TEMP_HIGH_C,
    }))
}

#[derive(Debug, Serialize)]
pub struct WeatherCount {
    pub condition: WeatherCondition,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    pub condition: WeatherCondition,
    pub wind_speed_kt: f64,
    pub turbulence_pct: f64,
    /// Conditions across the whole batch
    pub distribution: Vec<WeatherCount>,
}

/// Get latest weather and the batch distribution
pub async fn get_weather(State(state): State<SharedState>) -> Result<Json<WeatherResponse>, ApiError> {
    let state = state.read().await;
    let batch = state.batch()?;
    let latest = batch
        .latest()
        .map_err(|_| ApiError::Unavailable("No telemetry rows available"))?;

    Ok(Json(WeatherResponse {
        condition: latest.weather_condition,
        wind_speed_kt: latest.wind_speed_kt,
        turbulence_pct: latest.turbulence * 100.0,
        distribution: batch
            .weather_distribution()
            .into_iter()
            .map(|(condition, count)| WeatherCount { condition, count })
            .collect(),
    }))
}
