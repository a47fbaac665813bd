// clauseguard-client/src/risk_indicator.rs

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Above 70 is high, above 30 is medium, everything else low.
    pub fn from_score(score: f64) -> Self {
        if score > 70.0 {
            RiskLevel::High
        } else if score > 30.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

/// Badge for an optional risk score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskIndicator {
    score: Option<f64>,
}

impl RiskIndicator {
    pub fn new(score: Option<f64>) -> Self {
        Self { score }
    }

    pub fn level(&self) -> Option<RiskLevel> {
        self.score.map(RiskLevel::from_score)
    }
}

impl fmt::Display for RiskIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.score {
            None => write!(f, "Not Assessed"),
            Some(score) => write!(f, "{} ({})", RiskLevel::from_score(score).label(), score),
        }
    }
}

pub fn ab5_message(violation: bool) -> &'static str {
    if violation {
        "Potential AB-5 Violation Detected."
    } else {
        "No obvious AB-5 Violation Detected."
    }
}
