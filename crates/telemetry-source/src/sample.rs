//! Seeded sample telemetry for demos and offline operation

use crate::{SourceError, TelemetryBatch, TelemetrySource};
use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use telemetry_validator::{TelemetryRow, WeatherCondition};
use tracing::debug;

pub const DEFAULT_SAMPLE_SEED: u64 = 42;
pub const DEFAULT_SAMPLE_ROWS: usize = 100;

/// Generates a reproducible batch: one row per minute from 2025-01-01
#[derive(Debug, Clone)]
pub struct SampleSource {
    seed: u64,
    rows: usize,
}

impl SampleSource {
    pub fn new(seed: u64, rows: usize) -> Self {
        Self { seed, rows }
    }

    /// Build the batch synchronously
    pub fn generate(&self) -> TelemetryBatch {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let start = sample_epoch();

        let rows = (0..self.rows)
            .map(|i| TelemetryRow {
                timestamp: start + Duration::minutes(i as i64),
                heart_rate_bpm: f64::from(rng.gen_range(60u32..100)),
                fatigue_score: rng.gen::<f64>(),
                risk_score: rng.gen::<f64>(),
                engine1_temp_c: rng.gen_range(400.0..500.0),
                engine2_temp_c: rng.gen_range(400.0..500.0),
                altitude_ft: rng.gen_range(30_000.0..36_000.0),
                speed_mph: rng.gen_range(450.0..550.0),
                weather_condition: WeatherCondition::ALL[rng.gen_range(0..WeatherCondition::ALL.len())],
                wind_speed_kt: rng.gen_range(10.0..30.0),
                turbulence: rng.gen::<f64>(),
            })
            .collect();

        TelemetryBatch::new(rows, 0)
    }
}

impl Default for SampleSource {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_SEED, DEFAULT_SAMPLE_ROWS)
    }
}

#[async_trait]
impl TelemetrySource for SampleSource {
    fn name(&self) -> &str {
        "sample"
    }

    async fn fetch(&self) -> Result<TelemetryBatch, SourceError> {
        debug!("Generating {} sample rows (seed {})", self.rows, self.seed);
        Ok(self.generate())
    }
}

fn sample_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_reproducible() {
        let a = SampleSource::default().generate();
        let b = SampleSource::default().generate();
        assert_eq!(a.rows(), b.rows());
        assert_eq!(a.len(), DEFAULT_SAMPLE_ROWS);

        let other = SampleSource::new(7, DEFAULT_SAMPLE_ROWS).generate();
        assert_ne!(a.rows(), other.rows());
    }

    #[test]
    fn test_sample_ranges() {
        let batch = SampleSource::default().generate();
        for row in batch.rows() {
            assert!((60.0..100.0).contains(&row.heart_rate_bpm));
            assert!((0.0..1.0).contains(&row.fatigue_score));
            assert!((0.0..1.0).contains(&row.risk_score));
            assert!((0.0..1.0).contains(&row.turbulence));
            assert!((400.0..500.0).contains(&row.engine1_temp_c));
            assert!((30_000.0..36_000.0).contains(&row.altitude_ft));
        }
    }

    #[test]
    fn test_sample_timestamps_one_minute_apart() {
        let batch = SampleSource::new(1, 3).generate();
        let rows = batch.rows();
        assert_eq!(rows[1].timestamp - rows[0].timestamp, Duration::minutes(1));
        assert_eq!(rows[0].timestamp, sample_epoch());
    }

    #[tokio::test]
    async fn test_fetch() {
        let batch = SampleSource::new(3, 10).fetch().await.unwrap();
        assert_eq!(batch.len(), 10);
    }
}
