// File: clauseguard-common/src/models/record.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::gdpr::{GdprContractRequest, GdprContractResult};
use crate::models::risk::{RiskAssessmentRequest, RiskAssessmentResult};

/// A risk assessment about to be written under `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRiskAssessmentRecord {
    pub record_id: Uuid,
    pub user_id: String,
    pub contract_text: String,
    pub assessment_result: RiskAssessmentResult,
}

impl NewRiskAssessmentRecord {
    pub fn new(user_id: &str, request: &RiskAssessmentRequest, result: &RiskAssessmentResult) -> Self {
        Self {
            record_id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            contract_text: request.contract_text.clone(),
            assessment_result: result.clone(),
        }
    }
}

/// A generated GDPR contract about to be written under `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGdprContractRecord {
    pub record_id: Uuid,
    pub user_id: String,
    pub client_location: String,
    pub web_development_details: String,
    pub generated_contract: GdprContractResult,
}

impl NewGdprContractRecord {
    pub fn new(user_id: &str, request: &GdprContractRequest, result: &GdprContractResult) -> Self {
        Self {
            record_id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            client_location: request.client_location.clone(),
            web_development_details: request.web_development_details.clone(),
            generated_contract: result.clone(),
        }
    }
}

/// What the store hands back after a write: the id and the server-assigned timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RecordReceipt {
    pub record_id: Uuid,
    pub created_at: DateTime<Utc>,
}
