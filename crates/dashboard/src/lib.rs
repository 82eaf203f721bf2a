//! Flight Risk Dashboard API Server
//!
//! JSON API for the flight risk dashboard: live metrics, chart windows,
//! verdicts and alerts for the latest telemetry row.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use risk_classifier::ThresholdConfig;
use serde::Serialize;
use std::sync::Arc;
use telemetry_source::TelemetryBatch;
use tokio::sync::{watch, RwLock};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::subscriber::SetGlobalDefaultError;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod error;
mod poller;
mod routes;
mod settings;

pub use error::ApiError;
pub use poller::{RefreshPoller, Snapshot};
pub use settings::{Settings, SettingsError, SourceKind, SourceSettings, DEFAULT_FEED_URL};

/// State shared between the poller and handlers
pub type SharedState = Arc<RwLock<AppState>>;

/// Application state shared across handlers
pub struct AppState {
    pub settings: Settings,
    /// Session threshold, fixed at startup
    pub threshold: ThresholdConfig,
    /// Latest fetched batch, if any
    pub snapshot: Option<Snapshot>,
    pub source_name: String,
    pub version: String,
    pub start_time: std::time::Instant,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        settings: Settings,
        source_name: impl Into<String>,
        metrics: Option<PrometheusHandle>,
    ) -> Result<Self, SettingsError> {
        Ok(Self {
            threshold: settings.threshold()?,
            settings,
            snapshot: None,
            source_name: source_name.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            metrics,
        })
    }

    /// Batch with at least one row, or the reason there is none
    pub fn batch(&self) -> Result<&TelemetryBatch, ApiError> {
        let snapshot = self
            .snapshot
            .as_ref()
            .ok_or(ApiError::Unavailable("Telemetry has not been fetched yet"))?;
        if snapshot.batch.is_empty() {
            return Err(ApiError::Unavailable("No telemetry rows available"));
        }
        Ok(&snapshot.batch)
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: String,
    pub uptime_seconds: u64,
    pub source: String,
    pub refresh_count: u64,
    pub last_refresh: Option<chrono::DateTime<chrono::Utc>>,
    pub row_count: usize,
    pub rejected_rows: usize,
}

/// Create the application router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/telemetry/latest", get(routes::telemetry::get_latest))
        .route("/api/v1/telemetry/window", get(routes::telemetry::get_window))
        .route("/api/v1/assessment", get(routes::assessment::get_assessment))
        .route("/api/v1/alerts", get(routes::assessment::get_alerts))
        .route("/api/v1/engines", get(routes::conditions::get_engines))
        .route("/api/v1/weather", get(routes::conditions::get_weather))
        .route("/api/v1/flight", get(routes::flight::get_flight))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    let snapshot = state.snapshot.as_ref();

    let status = match snapshot {
        Some(s) if !s.batch.is_empty() => "healthy",
        Some(_) => "degraded",
        None => "starting",
    };

    Json(HealthResponse {
        status,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        source: state.source_name.clone(),
        refresh_count: snapshot.map_or(0, |s| s.refresh_count),
        last_refresh: snapshot.map(|s| s.refreshed_at),
        row_count: snapshot.map_or(0, |s| s.batch.len()),
        rejected_rows: snapshot.map_or(0, |s| s.batch.rejected()),
    })
}

/// Prometheus scrape endpoint
async fn metrics_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::NOT_FOUND,
            "metrics recorder not installed".to_string(),
        ),
    }
}

/// Initialize logging
pub fn init_logging(level: &str, json: bool) -> Result<(), SetGlobalDefaultError> {
    let level = level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    }
}

/// Run the refresh loop and API server until Ctrl-C
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let metrics = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Prometheus recorder unavailable: {}", e);
            None
        }
    };

    let source = settings.build_source()?;
    let state = Arc::new(RwLock::new(AppState::new(
        settings.clone(),
        source.name(),
        metrics,
    )?));

    let poller = RefreshPoller::new(
        source,
        state.clone(),
        settings.threshold()?,
        settings.refresh_interval(),
        settings.auto_refresh,
    );
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let refresher = tokio::spawn(poller.run(shutdown_rx));

    info!(
        "Flight {} ({}), risk threshold {}%",
        settings.flight_id, settings.route, settings.risk_threshold_pct
    );
    info!("Starting API server on {}", settings.bind_addr);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await?;

    info!("Shutting down");
    // Err only when the poller already exited (single-shot load)
    let _ = shutdown_tx.send(true);
    refresher.await?;
    Ok(())
}
