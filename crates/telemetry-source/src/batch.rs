//! One fetched batch of telemetry rows

use crate::SourceError;
use serde::Serialize;
use telemetry_validator::{TelemetryRow, WeatherCondition};

/// Ordered rows from a single fetch; the last row is the latest sample
#[derive(Debug, Clone, Default, Serialize)]
pub struct TelemetryBatch {
    rows: Vec<TelemetryRow>,
    /// Feed rows dropped during validation
    rejected: usize,
}

impl TelemetryBatch {
    pub fn new(rows: Vec<TelemetryRow>, rejected: usize) -> Self {
        Self { rows, rejected }
    }

    pub fn rows(&self) -> &[TelemetryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Latest row. An empty batch must not reach the classifier.
    pub fn latest(&self) -> Result<&TelemetryRow, SourceError> {
        self.rows.last().ok_or(SourceError::NoRowsAvailable)
    }

    /// Row before the latest, for metric deltas
    pub fn previous(&self) -> Option<&TelemetryRow> {
        self.rows.len().checked_sub(2).map(|i| &self.rows[i])
    }

    /// Trailing `n` rows (all rows if fewer)
    pub fn window(&self, n: usize) -> &[TelemetryRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }

    /// Row count per weather condition, in display order
    pub fn weather_distribution(&self) -> Vec<(WeatherCondition, usize)> {
        WeatherCondition::ALL
            .iter()
            .map(|&condition| {
                let count = self
                    .rows
                    .iter()
                    .filter(|r| r.weather_condition == condition)
                    .count();
                (condition, count)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use telemetry_validator::RowDefaults;

    fn batch_of(n: usize) -> TelemetryBatch {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let rows = (0..n)
            .map(|i| TelemetryRow {
                risk_score: i as f64 / 10.0,
                weather_condition: WeatherCondition::ALL[i % 3],
                ..RowDefaults::default().row_at(start + Duration::minutes(i as i64))
            })
            .collect();
        TelemetryBatch::new(rows, 0)
    }

    #[test]
    fn test_empty_batch_has_no_latest() {
        let batch = TelemetryBatch::default();
        assert!(matches!(batch.latest(), Err(SourceError::NoRowsAvailable)));
        assert!(batch.previous().is_none());
        assert!(batch.window(10).is_empty());
    }

    #[test]
    fn test_latest_and_previous() {
        let batch = batch_of(5);
        assert_eq!(batch.latest().unwrap().risk_score, 0.4);
        assert_eq!(batch.previous().unwrap().risk_score, 0.3);

        let single = batch_of(1);
        assert!(single.latest().is_ok());
        assert!(single.previous().is_none());
    }

    #[test]
    fn test_window_is_trailing() {
        let batch = batch_of(8);
        let window = batch.window(3);
        assert_eq!(window.len(), 3);
        assert_eq!(window[0].risk_score, 0.5);
        assert_eq!(batch.window(100).len(), 8);
    }

    #[test]
    fn test_weather_distribution() {
        let batch = batch_of(7);
        assert_eq!(
            batch.weather_distribution(),
            vec![
                (WeatherCondition::Clear, 3),
                (WeatherCondition::Cloudy, 2),
                (WeatherCondition::Rainy, 2),
            ]
        );
    }
}
