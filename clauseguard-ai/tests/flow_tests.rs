// tests/flow_tests.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use clauseguard_ai::traits::{GenerationRequest, ModelProvider};
use clauseguard_ai::{AiClient, GdprContractFlow, RiskAssessmentFlow};
use clauseguard_common::models::{GdprContractRequest, RiskAssessmentRequest};
use clauseguard_common::Error;

/// Returns a canned reply and counts how often it was asked.
struct CannedProvider {
    reply: Result<String, String>,
    calls: Arc<AtomicUsize>,
    last_schema: std::sync::Mutex<Option<String>>,
}

impl CannedProvider {
    fn replying(reply: &str) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self { reply: Ok(reply.to_string()), calls: calls.clone(), last_schema: Default::default() },
            calls,
        )
    }

    fn failing(message: &str) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self { reply: Err(message.to_string()), calls: calls.clone(), last_schema: Default::default() },
            calls,
        )
    }
}

#[async_trait]
impl ModelProvider for CannedProvider {
    fn name(&self) -> &str {
        "canned"
    }

    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_schema.lock().unwrap() = request.output_schema.as_ref().map(|s| s.name.clone());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(msg) => Err(anyhow::anyhow!(msg.clone())),
        }
    }
}

async fn client_for(provider: CannedProvider) -> Arc<AiClient> {
    Arc::new(AiClient::with_provider(Arc::new(provider)).await)
}

const STUB_REPLY: &str = r#"{"riskScore": 85, "riskyClauses": ["Clause A"], "suggestedReplacements": ["Replace A"], "ab5Violation": true}"#;

#[tokio::test]
async fn short_contract_is_rejected_before_model_call() {
    let (provider, calls) = CannedProvider::replying(STUB_REPLY);
    let flow = RiskAssessmentFlow::new(client_for(provider).await);

    for len in [0, 1, 49] {
        let err = flow.run(&RiskAssessmentRequest::new("a".repeat(len))).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "len {}: {:?}", len, err);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn valid_contract_returns_parsed_assessment() {
    let (provider, calls) = CannedProvider::replying(STUB_REPLY);
    let flow = RiskAssessmentFlow::new(client_for(provider).await);

    let result = flow.run(&RiskAssessmentRequest::new("x".repeat(60))).await.unwrap();
    assert_eq!(result.risk_score, 85.0);
    assert_eq!(result.risky_clauses, vec!["Clause A".to_string()]);
    assert_eq!(result.suggested_replacements, vec!["Replace A".to_string()]);
    assert!(result.ab5_violation);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn schema_is_sent_with_the_request() {
    let (provider, _calls) = CannedProvider::replying(STUB_REPLY);
    let provider = Arc::new(provider);
    let client = Arc::new(AiClient::with_provider(provider.clone()).await);
    let flow = RiskAssessmentFlow::new(client);

    flow.run(&RiskAssessmentRequest::new("y".repeat(60))).await.unwrap();
    assert_eq!(
        provider.last_schema.lock().unwrap().as_deref(),
        Some("contract_risk_assessment")
    );
}

#[tokio::test]
async fn missing_field_is_model_output_error() {
    let (provider, calls) = CannedProvider::replying(r#"{"riskScore": 10, "riskyClauses": [], "suggestedReplacements": []}"#);
    let flow = RiskAssessmentFlow::new(client_for(provider).await);

    let err = flow.run(&RiskAssessmentRequest::new("x".repeat(60))).await.unwrap_err();
    assert!(matches!(err, Error::ModelOutput(_)), "{:?}", err);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn out_of_range_score_is_model_output_error() {
    let (provider, _) = CannedProvider::replying(
        r#"{"riskScore": 150, "riskyClauses": [], "suggestedReplacements": [], "ab5Violation": false}"#,
    );
    let flow = RiskAssessmentFlow::new(client_for(provider).await);

    let err = flow.run(&RiskAssessmentRequest::new("x".repeat(60))).await.unwrap_err();
    assert!(matches!(err, Error::ModelOutput(_)), "{:?}", err);
}

#[tokio::test]
async fn provider_failure_is_not_retried() {
    let (provider, calls) = CannedProvider::failing("upstream 503");
    let flow = RiskAssessmentFlow::new(client_for(provider).await);

    let err = flow.run(&RiskAssessmentRequest::new("x".repeat(60))).await.unwrap_err();
    match err {
        Error::Provider(msg) => assert!(msg.contains("upstream 503")),
        other => panic!("unexpected: {:?}", other),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn short_project_details_are_rejected_before_model_call() {
    let (provider, calls) = CannedProvider::replying(r#"{"contractText": "..."}"#);
    let flow = GdprContractFlow::new(client_for(provider).await);

    let err = flow
        .run(&GdprContractRequest::new("Germany", "too short details"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Project details must be at least 20 characters.");

    let err = flow
        .run(&GdprContractRequest::new("D", "A marketing site with a newsletter signup"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Client location must be at least 2 characters.");

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn gdpr_contract_is_returned_as_generated() {
    let (provider, calls) = CannedProvider::replying(
        r#"{"contractText": "WEB DEVELOPMENT AGREEMENT\n1. Data Processing Agreement ..."}"#,
    );
    let flow = GdprContractFlow::new(client_for(provider).await);

    let result = flow
        .run(&GdprContractRequest::new("Germany", "A marketing site with a newsletter signup"))
        .await
        .unwrap();
    assert!(result.contract_text.starts_with("WEB DEVELOPMENT AGREEMENT"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
