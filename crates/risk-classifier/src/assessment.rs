//! Classification results and alerts

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall classification of the latest row, by risk score only
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Normal,
    Moderate,
    High,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Normal => "NORMAL",
            Verdict::Moderate => "MODERATE",
            Verdict::High => "HIGH",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pilot heart-rate zone. A tag, not an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeartRateZone {
    Low,
    Normal,
    Elevated,
}

/// Colour of the risk metric tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskIndicator {
    Green,
    Amber,
    Red,
}

/// Gauge band for an engine temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineTempBand {
    Nominal,
    Caution,
    Critical,
}

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conditions the classifier can raise, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    RiskThreshold,
    Engine1Temperature,
    PilotFatigue,
    Turbulence,
}

impl AlertKind {
    pub fn severity(&self) -> Severity {
        match self {
            AlertKind::RiskThreshold => Severity::High,
            _ => Severity::Medium,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AlertKind::RiskThreshold => "Risk Score Exceeded Threshold",
            AlertKind::Engine1Temperature => "Engine 1 Temperature High",
            AlertKind::PilotFatigue => "Pilot Fatigue Detected",
            AlertKind::Turbulence => "High Turbulence Detected",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AlertKind::RiskThreshold => "Immediate attention required",
            AlertKind::Engine1Temperature => "Monitor engine performance",
            AlertKind::PilotFatigue => "Consider crew rotation",
            AlertKind::Turbulence => "Advise passengers",
        }
    }
}

/// One raised condition, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub kind: AlertKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
}

impl AlertRecord {
    pub fn is_high(&self) -> bool {
        self.severity == Severity::High
    }
}

impl From<AlertKind> for AlertRecord {
    fn from(kind: AlertKind) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            title: kind.title().to_string(),
            description: kind.description().to_string(),
        }
    }
}

impl fmt::Display for AlertRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}: {}", self.severity, self.title, self.description)
    }
}

/// Complete classifier output for one row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub verdict: Verdict,
    pub heart_rate_zone: HeartRateZone,
    pub risk_indicator: RiskIndicator,
    /// Raised alerts in fixed evaluation order
    pub alerts: Vec<AlertRecord>,
}

impl Assessment {
    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }

    pub fn high_alert_count(&self) -> usize {
        self.alerts.iter().filter(|a| a.is_high()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_record_from_kind() {
        let alert = AlertRecord::from(AlertKind::RiskThreshold);
        assert_eq!(alert.severity, Severity::High);
        assert_eq!(alert.title, "Risk Score Exceeded Threshold");
        assert!(alert.is_high());

        let alert = AlertRecord::from(AlertKind::Turbulence);
        assert_eq!(alert.severity, Severity::Medium);
        assert_eq!(alert.description, "Advise passengers");
    }

    #[test]
    fn test_display() {
        let alert = AlertRecord::from(AlertKind::PilotFatigue);
        assert_eq!(
            alert.to_string(),
            "MEDIUM | Pilot Fatigue Detected: Consider crew rotation"
        );
        assert_eq!(Verdict::Moderate.to_string(), "MODERATE");
    }
}
