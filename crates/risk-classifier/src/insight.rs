//! Copilot insight text keyed by verdict

use crate::assessment::Verdict;
use serde::Serialize;

/// Static analysis and recommendation text for the copilot panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub verdict: Verdict,
    pub headline: &'static str,
    pub analysis: &'static [&'static str],
    pub recommendations: &'static [&'static str],
}

static HIGH: Insight = Insight {
    verdict: Verdict::High,
    headline: "HIGH RISK DETECTED",
    analysis: &[
        "Critical anomaly detected in flight systems",
        "Possible engine or weather-related issues",
        "Immediate crew notification recommended",
    ],
    recommendations: &[
        "Alert flight crew immediately",
        "Prepare for emergency protocols",
        "Contact ground control",
        "Monitor all systems continuously",
    ],
};

static MODERATE: Insight = Insight {
    verdict: Verdict::Moderate,
    headline: "MODERATE RISK DETECTED",
    analysis: &[
        "Some system parameters outside normal range",
        "Pilot fatigue or environmental factors detected",
        "Continuous monitoring advised",
    ],
    recommendations: &[
        "Monitor pilot vital signs",
        "Check weather conditions ahead",
        "Verify all system statuses",
        "Prepare contingency plans",
    ],
};

static NORMAL: Insight = Insight {
    verdict: Verdict::Normal,
    headline: "ALL SYSTEMS NORMAL",
    analysis: &[
        "All flight parameters within safe limits",
        "Pilot vitals stable",
        "Weather conditions favorable",
        "Flight proceeding as planned",
    ],
    recommendations: &["Safe flight conditions maintained"],
};

pub fn insight(verdict: Verdict) -> &'static Insight {
    match verdict {
        Verdict::High => &HIGH,
        Verdict::Moderate => &MODERATE,
        Verdict::Normal => &NORMAL,
    }
}
