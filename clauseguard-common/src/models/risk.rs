// File: clauseguard-common/src/models/risk.rs

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::validation::{check_min_chars, into_result, FieldError};

pub const MIN_CONTRACT_TEXT_CHARS: usize = 50;
pub const MAX_RISK_SCORE: f64 = 100.0;

/// Contract text submitted for risk scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessmentRequest {
    /// Plain text of the contract (or text extracted from a PDF).
    #[serde(default)]
    pub contract_text: String,
}

impl RiskAssessmentRequest {
    pub fn new(contract_text: impl Into<String>) -> Self {
        Self {
            contract_text: contract_text.into(),
        }
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        check_min_chars(
            &mut errors,
            "contractText",
            &self.contract_text,
            MIN_CONTRACT_TEXT_CHARS,
            "Contract text must be at least 50 characters.",
        );
        errors
    }

    pub fn validate(&self) -> Result<(), Error> {
        into_result(self.field_errors())
    }
}

/// Structured assessment produced by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessmentResult {
    /// 0 to 100, with 100 being the riskiest.
    pub risk_score: f64,
    pub risky_clauses: Vec<String>,
    pub suggested_replacements: Vec<String>,
    /// Whether the contract violates California AB-5.
    pub ab5_violation: bool,
}

impl RiskAssessmentResult {
    /// Range check applied after the shape has been parsed.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.risk_score.is_finite() || !(0.0..=MAX_RISK_SCORE).contains(&self.risk_score) {
            return Err(Error::ModelOutput(format!(
                "riskScore must be between 0 and 100, got {}",
                self.risk_score
            )));
        }
        Ok(())
    }
}
