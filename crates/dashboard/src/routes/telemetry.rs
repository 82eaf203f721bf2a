//! Telemetry Routes

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDateTime;
use risk_classifier::{risk_indicator, RiskIndicator};
use serde::{Deserialize, Serialize};
use telemetry_validator::TelemetryRow;

use crate::{ApiError, SharedState};

const MIN_WINDOW: usize = 10;
const MAX_WINDOW: usize = 100;

/// Headline metrics of the latest row
#[derive(Debug, Serialize)]
pub struct LiveMetrics {
    pub timestamp: NaiveDateTime,
    pub altitude_ft: f64,
    pub speed_mph: f64,
    pub heart_rate_bpm: f64,
    pub fatigue_pct: f64,
    pub risk_pct: f64,
    pub risk_indicator: RiskIndicator,
    /// Change since the previous row, absent for a single-row batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deltas: Option<MetricDeltas>,
}

#[derive(Debug, Serialize)]
pub struct MetricDeltas {
    pub altitude_ft: f64,
    pub speed_mph: f64,
    pub heart_rate_bpm: f64,
    pub fatigue_pct: f64,
    pub risk_pct: f64,
}

impl MetricDeltas {
    fn between(previous: &TelemetryRow, latest: &TelemetryRow) -> Self {
        Self {
            altitude_ft: latest.altitude_ft - previous.altitude_ft,
            speed_mph: latest.speed_mph - previous.speed_mph,
            heart_rate_bpm: latest.heart_rate_bpm - previous.heart_rate_bpm,
            fatigue_pct: (latest.fatigue_score - previous.fatigue_score) * 100.0,
            risk_pct: (latest.risk_score - previous.risk_score) * 100.0,
        }
    }
}

/// Get live metrics for the latest row
pub async fn get_latest(State(state): State<SharedState>) -> Result<Json<LiveMetrics>, ApiError> {
    let state = state.read().await;
    let batch = state.batch()?;
    let latest = batch
        .latest()
        .map_err(|_| ApiError::Unavailable("No telemetry rows available"))?;

    Ok(Json(LiveMetrics {
        timestamp: latest.timestamp,
        altitude_ft: latest.altitude_ft,
        speed_mph: latest.speed_mph,
        heart_rate_bpm: latest.heart_rate_bpm,
        fatigue_pct: latest.fatigue_score * 100.0,
        risk_pct: latest.risk_score * 100.0,
        risk_indicator: risk_indicator(latest.risk_score),
        deltas: batch
            .previous()
            .map(|previous| MetricDeltas::between(previous, latest)),
    }))
}

/// Query parameters for the window endpoint
#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    /// Trailing rows to return, clamped to [10, 100]
    pub limit: Option<usize>,
}

/// Chart series for the trailing window
#[derive(Debug, Serialize)]
pub struct WindowResponse {
    pub data: Vec<TelemetryRow>,
    pub count: usize,
    pub limit: usize,
    /// Horizontal threshold line for the risk chart (%)
    pub risk_threshold_pct: u8,
}

/// Get the trailing display window
pub async fn get_window(
    State(state): State<SharedState>,
    Query(params): Query<WindowQuery>,
) -> Result<Json<WindowResponse>, ApiError> {
    let state = state.read().await;
    let limit = params
        .limit
        .unwrap_or(state.settings.display_window)
        .clamp(MIN_WINDOW, MAX_WINDOW);

    let data = state.batch()?.window(limit).to_vec();

    Ok(Json(WindowResponse {
        count: data.len(),
        limit,
        risk_threshold_pct: state.threshold.risk_threshold_pct(),
        data,
    }))
}
