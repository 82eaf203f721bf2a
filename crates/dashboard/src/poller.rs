//! Periodic telemetry refresh

use crate::SharedState;
use chrono::{DateTime, Utc};
use risk_classifier::{classify, ThresholdConfig, Verdict};
use std::time::Duration;
use telemetry_source::{SourceError, TelemetryBatch, TelemetrySource};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Most recently fetched batch
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub batch: TelemetryBatch,
    pub refreshed_at: DateTime<Utc>,
    /// Successful refreshes since start
    pub refresh_count: u64,
}

/// Re-fetches the source on a fixed interval and publishes snapshots
pub struct RefreshPoller {
    source: Box<dyn TelemetrySource>,
    state: SharedState,
    threshold: ThresholdConfig,
    interval: Duration,
    auto_refresh: bool,
}

impl RefreshPoller {
    pub fn new(
        source: Box<dyn TelemetrySource>,
        state: SharedState,
        threshold: ThresholdConfig,
        interval: Duration,
        auto_refresh: bool,
    ) -> Self {
        Self {
            source,
            state,
            threshold,
            interval,
            auto_refresh,
        }
    }

    /// Fetch one batch and publish it. A failed fetch keeps the previous snapshot.
    pub async fn refresh_once(&self) -> Result<(), SourceError> {
        let batch = match self.source.fetch().await {
            Ok(batch) => batch,
            Err(e) => {
                metrics::counter!("telemetry_refresh_failures_total").increment(1);
                warn!("Telemetry refresh from {} failed: {}", self.source.name(), e);
                return Err(e);
            }
        };

        metrics::counter!("telemetry_refresh_total").increment(1);
        metrics::counter!("telemetry_rows_rejected_total").increment(batch.rejected() as u64);
        self.record_latest(&batch);

        let mut state = self.state.write().await;
        let refresh_count = state.snapshot.as_ref().map_or(0, |s| s.refresh_count) + 1;
        state.snapshot = Some(Snapshot {
            batch,
            refreshed_at: Utc::now(),
            refresh_count,
        });
        Ok(())
    }

    /// Log and export the latest row's assessment
    fn record_latest(&self, batch: &TelemetryBatch) {
        let latest = match batch.latest() {
            Ok(row) => row,
            Err(e) => {
                warn!("Fetched batch from {} is unusable: {}", self.source.name(), e);
                return;
            }
        };

        let assessment = classify(latest, &self.threshold);
        metrics::gauge!("telemetry_risk_score").set(latest.risk_score);
        for alert in &assessment.alerts {
            metrics::counter!("alerts_raised_total", "severity" => alert.severity.as_str())
                .increment(1);
        }

        match assessment.verdict {
            Verdict::High => warn!(
                "HIGH risk at {}: score {:.2}, {} alerts",
                latest.timestamp,
                latest.risk_score,
                assessment.alerts.len()
            ),
            verdict => debug!(
                "Refreshed {} rows ({} rejected), verdict {}",
                batch.len(),
                batch.rejected(),
                verdict
            ),
        }
    }

    /// Run until `shutdown` flips to true. Without auto refresh, fetch once and return.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        if !self.auto_refresh {
            info!("Auto refresh disabled, loading telemetry once");
            let _ = self.refresh_once().await;
            return;
        }

        info!(
            "Starting telemetry refresh every {}s from {}",
            self.interval.as_secs(),
            self.source.name()
        );
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let _ = self.refresh_once().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Telemetry refresh stopped");
    }
}
