//! Threshold evaluation over a single telemetry row

use crate::assessment::{
    AlertKind, AlertRecord, Assessment, EngineTempBand, HeartRateZone, RiskIndicator, Verdict,
};
use crate::config::{
    ThresholdConfig, ENGINE_TEMP_HIGH_C, FATIGUE_HIGH, HEART_RATE_HIGH, HEART_RATE_LOW,
    TURBULENCE_HIGH, VERDICT_HIGH_RISK, VERDICT_MODERATE_RISK,
};
use telemetry_validator::TelemetryRow;

/// Classify a resolved row against the session thresholds.
///
/// Pure: the row is not modified and nothing outside the arguments is read.
/// The input is assumed to be defaulted and clamped already.
pub fn classify(row: &TelemetryRow, config: &ThresholdConfig) -> Assessment {
    Assessment {
        verdict: verdict(row.risk_score),
        heart_rate_zone: heart_rate_zone(row.heart_rate_bpm),
        risk_indicator: risk_indicator(row.risk_score),
        alerts: evaluate_alerts(row, config),
    }
}

/// Verdict from the fixed 0.4 / 0.7 cutoffs; upper bounds are inclusive
pub fn verdict(risk_score: f64) -> Verdict {
    if risk_score > VERDICT_HIGH_RISK {
        Verdict::High
    } else if risk_score > VERDICT_MODERATE_RISK {
        Verdict::Moderate
    } else {
        Verdict::Normal
    }
}

pub fn heart_rate_zone(heart_rate_bpm: f64) -> HeartRateZone {
    if heart_rate_bpm < HEART_RATE_LOW {
        HeartRateZone::Low
    } else if heart_rate_bpm < HEART_RATE_HIGH {
        HeartRateZone::Normal
    } else {
        HeartRateZone::Elevated
    }
}

/// Tile colour for the risk metric
pub fn risk_indicator(risk_score: f64) -> RiskIndicator {
    if risk_score < 0.3 {
        RiskIndicator::Green
    } else if risk_score < 0.7 {
        RiskIndicator::Amber
    } else {
        RiskIndicator::Red
    }
}

/// Gauge band: green below 400 °C, amber to 500 °C, red above
pub fn engine_band(temp_c: f64) -> EngineTempBand {
    if temp_c < 400.0 {
        EngineTempBand::Nominal
    } else if temp_c < ENGINE_TEMP_HIGH_C {
        EngineTempBand::Caution
    } else {
        EngineTempBand::Critical
    }
}

/// Independent checks; each one that trips appends an alert in order
fn evaluate_alerts(row: &TelemetryRow, config: &ThresholdConfig) -> Vec<AlertRecord> {
    let checks = [
        (AlertKind::RiskThreshold, row.risk_score > config.risk_threshold()),
        (AlertKind::Engine1Temperature, row.engine1_temp_c > ENGINE_TEMP_HIGH_C),
        (AlertKind::PilotFatigue, row.fatigue_score > FATIGUE_HIGH),
        (AlertKind::Turbulence, row.turbulence > TURBULENCE_HIGH),
    ];

    checks
        .into_iter()
        .filter(|(_, tripped)| *tripped)
        .map(|(kind, _)| AlertRecord::from(kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::Severity;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use telemetry_validator::{Field, RawTelemetryRow, RowDefaults, Validator};

    fn base_row() -> TelemetryRow {
        let ts = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        RowDefaults::default().row_at(ts)
    }

    fn row(risk: f64, engine1: f64, fatigue: f64, turbulence: f64) -> TelemetryRow {
        TelemetryRow {
            risk_score: risk,
            engine1_temp_c: engine1,
            fatigue_score: fatigue,
            turbulence,
            ..base_row()
        }
    }

    fn threshold(pct: u32) -> ThresholdConfig {
        ThresholdConfig::new(pct).unwrap()
    }

    #[test]
    fn test_verdict_boundaries() {
        assert_eq!(verdict(0.0), Verdict::Normal);
        assert_eq!(verdict(0.4), Verdict::Normal);
        assert_eq!(verdict(0.40001), Verdict::Moderate);
        assert_eq!(verdict(0.7), Verdict::Moderate);
        assert_eq!(verdict(0.70001), Verdict::High);
        assert_eq!(verdict(1.0), Verdict::High);
    }

    #[test]
    fn test_heart_rate_zones() {
        assert_eq!(heart_rate_zone(59.0), HeartRateZone::Low);
        assert_eq!(heart_rate_zone(60.0), HeartRateZone::Normal);
        assert_eq!(heart_rate_zone(99.0), HeartRateZone::Normal);
        assert_eq!(heart_rate_zone(100.0), HeartRateZone::Elevated);
    }

    #[test]
    fn test_all_alerts_in_order() {
        let assessment = classify(&row(0.9, 550.0, 0.9, 0.9), &threshold(70));

        let kinds: Vec<_> = assessment.alerts.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AlertKind::RiskThreshold,
                AlertKind::Engine1Temperature,
                AlertKind::PilotFatigue,
                AlertKind::Turbulence,
            ]
        );
        assert_eq!(assessment.alerts[0].severity, Severity::High);
        assert!(assessment.alerts[1..]
            .iter()
            .all(|a| a.severity == Severity::Medium));
        assert_eq!(assessment.verdict, Verdict::High);
        assert_eq!(assessment.high_alert_count(), 1);
    }

    #[test]
    fn test_quiet_row() {
        let assessment = classify(&row(0.1, 400.0, 0.1, 0.1), &threshold(70));
        assert!(!assessment.has_alerts());
        assert_eq!(assessment.verdict, Verdict::Normal);
    }

    #[test]
    fn test_threshold_sensitivity() {
        let r = row(0.65, 450.0, 0.1, 0.1);

        let at_60 = classify(&r, &threshold(60));
        assert_eq!(at_60.alerts.len(), 1);
        assert_eq!(at_60.alerts[0].kind, AlertKind::RiskThreshold);
        assert_eq!(at_60.verdict, Verdict::Moderate);

        let at_70 = classify(&r, &threshold(70));
        assert!(at_70.alerts.is_empty());
        assert_eq!(at_70.verdict, Verdict::Moderate);
    }

    #[test]
    fn test_limits_are_exclusive() {
        // Exactly at each limit trips nothing
        let assessment = classify(&row(0.7, 500.0, 0.7, 0.7), &threshold(70));
        assert!(assessment.alerts.is_empty());
    }

    #[test]
    fn test_only_middle_alerts() {
        let assessment = classify(&row(0.2, 510.0, 0.2, 0.8), &threshold(70));
        let kinds: Vec<_> = assessment.alerts.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AlertKind::Engine1Temperature, AlertKind::Turbulence]);
    }

    #[test]
    fn test_idempotent() {
        let r = row(0.55, 520.0, 0.8, 0.3);
        let config = threshold(50);
        let before = r.clone();

        let first = classify(&r, &config);
        let second = classify(&r, &config);
        assert_eq!(first, second);
        assert_eq!(r, before);
    }

    #[test]
    fn test_missing_engine_temp_defaults_below_limit() {
        let raw = RawTelemetryRow::new()
            .with(Field::Timestamp, "2025-01-01 00:00:00")
            .with(Field::Risk, "0.1")
            .with(Field::Fatigue, "0.1")
            .with(Field::Turbulence, "0.1");
        let r = Validator::default().resolve(&raw).unwrap();
        assert_eq!(r.engine1_temp_c, 450.0);

        let assessment = classify(&r, &ThresholdConfig::default());
        assert!(!assessment
            .alerts
            .iter()
            .any(|a| a.kind == AlertKind::Engine1Temperature));
    }

    #[test]
    fn test_risk_indicator_and_engine_band() {
        assert_eq!(risk_indicator(0.29), RiskIndicator::Green);
        assert_eq!(risk_indicator(0.3), RiskIndicator::Amber);
        assert_eq!(risk_indicator(0.69), RiskIndicator::Amber);
        assert_eq!(risk_indicator(0.7), RiskIndicator::Red);

        assert_eq!(engine_band(399.9), EngineTempBand::Nominal);
        assert_eq!(engine_band(400.0), EngineTempBand::Caution);
        assert_eq!(engine_band(500.0), EngineTempBand::Critical);
    }

    #[test]
    fn test_serialized_labels() {
        let assessment = classify(&row(0.9, 450.0, 0.1, 0.1), &threshold(70));
        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["verdict"], "HIGH");
        assert_eq!(json["heart_rate_zone"], "NORMAL");
        assert_eq!(json["alerts"][0]["severity"], "HIGH");
        assert_eq!(json["alerts"][0]["kind"], "risk_threshold");
    }

    proptest! {
        #[test]
        fn prop_verdict_partitions_unit_interval(r in 0.0f64..=1.0) {
            let v = verdict(r);
            prop_assert_eq!(v == Verdict::High, r > 0.7);
            prop_assert_eq!(v == Verdict::Moderate, r > 0.4 && r <= 0.7);
            prop_assert_eq!(v == Verdict::Normal, r <= 0.4);
        }

        #[test]
        fn prop_verdict_ignores_operator_threshold(r in 0.0f64..=1.0, pct in 0u32..=100) {
            let a = classify(&row(r, 450.0, 0.1, 0.1), &threshold(pct));
            prop_assert_eq!(a.verdict, verdict(r));
            prop_assert_eq!(
                a.alerts.iter().any(|x| x.kind == AlertKind::RiskThreshold),
                r > f64::from(pct) / 100.0
            );
        }
    }
}
