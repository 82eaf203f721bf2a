//! Assessment and Alert Routes

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDateTime;
use risk_classifier::{
    classify, insight, AlertRecord, Assessment, HeartRateZone, Insight, RiskIndicator,
    ThresholdConfig, Verdict,
};
use serde::{Deserialize, Serialize};

use crate::{ApiError, AppState, SharedState};

/// Optional per-request threshold override
#[derive(Debug, Deserialize)]
pub struct ThresholdQuery {
    pub risk_threshold_pct: Option<u32>,
}

impl ThresholdQuery {
    fn resolve(&self, session: ThresholdConfig) -> Result<ThresholdConfig, ApiError> {
        match self.risk_threshold_pct {
            Some(pct) => ThresholdConfig::new(pct).map_err(|e| ApiError::BadRequest(e.to_string())),
            None => Ok(session),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    pub timestamp: NaiveDateTime,
    pub risk_threshold_pct: u8,
    pub verdict: Verdict,
    pub heart_rate_zone: HeartRateZone,
    pub risk_indicator: RiskIndicator,
    pub alerts: Vec<AlertRecord>,
    pub insight: &'static Insight,
}

#[derive(Debug, Serialize)]
pub struct AlertResponse {
    pub data: Vec<AlertRecord>,
    pub count: usize,
    pub high_count: usize,
    /// No active alerts, all systems operating normally
    pub all_clear: bool,
}

fn assess(
    state: &AppState,
    query: &ThresholdQuery,
) -> Result<(NaiveDateTime, ThresholdConfig, Assessment), ApiError> {
    let threshold = query.resolve(state.threshold)?;
    let latest = state
        .batch()?
        .latest()
        .map_err(|_| ApiError::Unavailable("No telemetry rows available"))?;
    Ok((latest.timestamp, threshold, classify(latest, &threshold)))
}

/// Get the full assessment of the latest row
pub async fn get_assessment(
    State(state): State<SharedState>,
    Query(params): Query<ThresholdQuery>,
) -> Result<Json<AssessmentResponse>, ApiError> {
    let state = state.read().await;
    let (timestamp, threshold, assessment) = assess(&state, &params)?;

    Ok(Json(AssessmentResponse {
        timestamp,
        risk_threshold_pct: threshold.risk_threshold_pct(),
        verdict: assessment.verdict,
        heart_rate_zone: assessment.heart_rate_zone,
        risk_indicator: assessment.risk_indicator,
        insight: insight(assessment.verdict),
        alerts: assessment.alerts,
    }))
}

/// Get active alerts for the latest row
pub async fn get_alerts(
    State(state): State<SharedState>,
    Query(params): Query<ThresholdQuery>,
) -> Result<Json<AlertResponse>, ApiError> {
    let state = state.read().await;
    let (_, _, assessment) = assess(&state, &params)?;

    Ok(Json(AlertResponse {
        count: assessment.alerts.len(),
        high_count: assessment.high_alert_count(),
        all_clear: !assessment.has_alerts(),
        data: assessment.alerts,
    }))
}
