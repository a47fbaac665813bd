// clauseguard-client/src/http_client.rs

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use clauseguard_common::models::{
    ActionResponse, GdprContractRequest, GdprContractResult, RiskAssessmentRequest,
    RiskAssessmentResult,
};
use clauseguard_common::routes::{GDPR_CONTRACT_PATH, RISK_ASSESSMENT_PATH};
use clauseguard_common::traits::ContractActionsApi;

/// Calls the server actions over HTTP with a bearer session token.
///
/// Transport and decoding failures come back as failure envelopes, so forms see one shape.
pub struct HttpActionsClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpActionsClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> ActionResponse<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        let mut request = self.client.post(&url).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                error!("Request to {} failed: {}", url, e);
                return ActionResponse::fail(format!("Could not reach the server: {}", e));
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(t) => t,
            Err(e) => {
                error!("Failed to read response from {}: {}", url, e);
                return ActionResponse::fail(format!("Could not read the server response: {}", e));
            }
        };

        match serde_json::from_str::<ActionResponse<T>>(&text) {
            Ok(envelope) => envelope,
            Err(e) => {
                error!("Unexpected response from {} (HTTP {}): {}", url, status, e);
                ActionResponse::fail(format!("Unexpected server response (HTTP {})", status))
            }
        }
    }
}

#[async_trait]
impl ContractActionsApi for HttpActionsClient {
    async fn run_contract_risk_assessment(
        &self,
        request: RiskAssessmentRequest,
    ) -> ActionResponse<RiskAssessmentResult> {
        self.post(RISK_ASSESSMENT_PATH, &request).await
    }

    async fn run_generate_gdpr_contract(
        &self,
        request: GdprContractRequest,
    ) -> ActionResponse<GdprContractResult> {
        self.post(GDPR_CONTRACT_PATH, &request).await
    }
}
