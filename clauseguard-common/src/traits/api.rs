use async_trait::async_trait;

use crate::models::{
    ActionResponse, GdprContractRequest, GdprContractResult, RiskAssessmentRequest,
    RiskAssessmentResult,
};

/// The two server actions as seen from a client form.
///
/// Implementations never return errors directly; failures travel inside the envelope.
#[async_trait]
pub trait ContractActionsApi: Send + Sync {
    async fn run_contract_risk_assessment(
        &self,
        request: RiskAssessmentRequest,
    ) -> ActionResponse<RiskAssessmentResult>;

    async fn run_generate_gdpr_contract(
        &self,
        request: GdprContractRequest,
    ) -> ActionResponse<GdprContractResult>;
}
