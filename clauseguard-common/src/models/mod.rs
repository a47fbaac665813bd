// File: clauseguard-common/src/models/mod.rs
pub mod envelope;
pub mod gdpr;
pub mod identity;
pub mod record;
pub mod risk;
pub mod validation;

pub use envelope::ActionResponse;
pub use gdpr::{GdprContractRequest, GdprContractResult};
pub use identity::{AuthState, CallerCredentials, Identity};
pub use record::{NewGdprContractRecord, NewRiskAssessmentRecord, RecordReceipt};
pub use risk::{RiskAssessmentRequest, RiskAssessmentResult};
pub use validation::FieldError;
