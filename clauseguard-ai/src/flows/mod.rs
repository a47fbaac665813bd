pub mod gdpr_contract;
pub mod risk_assessment;

pub use gdpr_contract::{GdprContract, GdprContractFlow};
pub use risk_assessment::{RiskAssessment, RiskAssessmentFlow};
