// clauseguard-core/src/services/contract_actions.rs

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use clauseguard_ai::{AiClient, GdprContractFlow, RiskAssessmentFlow};
use clauseguard_common::models::{
    ActionResponse, CallerCredentials, GdprContractRequest, GdprContractResult, Identity,
    NewGdprContractRecord, NewRiskAssessmentRecord, RiskAssessmentRequest, RiskAssessmentResult,
};
use clauseguard_common::traits::api::ContractActionsApi;
use clauseguard_common::traits::auth_traits::IdentityResolver;
use clauseguard_common::traits::repository_traits::RecordRepository;

use crate::auth::NOT_AUTHENTICATED;
use crate::Error;

/// The two server actions.
///
/// Each action resolves the caller, runs its flow, stores the request/result pair under
/// the caller's user id, and reports the outcome as an [`ActionResponse`]. Errors never
/// escape: they are logged and folded into the failure envelope. A store failure after
/// a successful model call is still a failure, and the model result is discarded.
pub struct ContractActions {
    identity: Arc<dyn IdentityResolver>,
    records: Arc<dyn RecordRepository>,
    risk_flow: RiskAssessmentFlow,
    gdpr_flow: GdprContractFlow,
}

impl ContractActions {
    pub fn new(
        identity: Arc<dyn IdentityResolver>,
        records: Arc<dyn RecordRepository>,
        ai: Arc<AiClient>,
    ) -> Self {
        Self {
            identity,
            records,
            risk_flow: RiskAssessmentFlow::new(ai.clone()),
            gdpr_flow: GdprContractFlow::new(ai),
        }
    }

    pub async fn run_contract_risk_assessment(
        &self,
        credentials: &CallerCredentials,
        request: RiskAssessmentRequest,
    ) -> ActionResponse<RiskAssessmentResult> {
        match self.assess(credentials, &request).await {
            Ok(result) => ActionResponse::ok(result),
            Err(e) => failure("runContractRiskAssessment", e, "Failed to assess contract risk."),
        }
    }

    pub async fn run_generate_gdpr_contract(
        &self,
        credentials: &CallerCredentials,
        request: GdprContractRequest,
    ) -> ActionResponse<GdprContractResult> {
        match self.generate(credentials, &request).await {
            Ok(result) => ActionResponse::ok(result),
            Err(e) => failure("runGenerateGdprContract", e, "Failed to generate GDPR contract."),
        }
    }

    async fn require_identity(&self, credentials: &CallerCredentials) -> Result<Identity, Error> {
        self.identity
            .resolve(credentials)
            .await?
            .ok_or_else(|| Error::Auth(NOT_AUTHENTICATED.to_string()))
    }

    async fn assess(
        &self,
        credentials: &CallerCredentials,
        request: &RiskAssessmentRequest,
    ) -> Result<RiskAssessmentResult, Error> {
        let identity = self.require_identity(credentials).await?;

        let result = self.risk_flow.run(request).await?;

        let record = NewRiskAssessmentRecord::new(&identity.user_id, request, &result);
        let receipt = self.records.insert_risk_assessment(&record).await?;
        info!(
            "Stored risk assessment {} for user {} (score={})",
            receipt.record_id, identity.user_id, result.risk_score
        );

        Ok(result)
    }

    async fn generate(
        &self,
        credentials: &CallerCredentials,
        request: &GdprContractRequest,
    ) -> Result<GdprContractResult, Error> {
        let identity = self.require_identity(credentials).await?;

        let result = self.gdpr_flow.run(request).await?;

        let record = NewGdprContractRecord::new(&identity.user_id, request, &result);
        let receipt = self.records.insert_gdpr_contract(&record).await?;
        info!(
            "Stored GDPR contract {} for user {} (location={})",
            receipt.record_id, identity.user_id, request.client_location
        );

        Ok(result)
    }
}

fn failure<T>(action: &str, e: Error, fallback: &str) -> ActionResponse<T> {
    error!("Error in {} [{}]: {}", action, e.kind(), e);
    let message = e.to_string();
    if message.trim().is_empty() {
        ActionResponse::fail(fallback)
    } else {
        ActionResponse::fail(message)
    }
}

/// [`ContractActions`] bound to one caller's credentials, for in-process clients.
pub struct BoundActions {
    actions: Arc<ContractActions>,
    credentials: CallerCredentials,
}

impl BoundActions {
    pub fn new(actions: Arc<ContractActions>, credentials: CallerCredentials) -> Self {
        Self { actions, credentials }
    }
}

#[async_trait]
impl ContractActionsApi for BoundActions {
    async fn run_contract_risk_assessment(
        &self,
        request: RiskAssessmentRequest,
    ) -> ActionResponse<RiskAssessmentResult> {
        self.actions
            .run_contract_risk_assessment(&self.credentials, request)
            .await
    }

    async fn run_generate_gdpr_contract(
        &self,
        request: GdprContractRequest,
    ) -> ActionResponse<GdprContractResult> {
        self.actions
            .run_generate_gdpr_contract(&self.credentials, request)
            .await
    }
}
