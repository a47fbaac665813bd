// tests/contract_actions_tests.rs

mod test_utils;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use clauseguard_common::models::{
    CallerCredentials, GdprContractRequest, RiskAssessmentRequest, RiskAssessmentResult,
};
use clauseguard_common::traits::ContractActionsApi;
use clauseguard_core::{BoundActions, ContractActions};

use test_utils::{
    ai_client, filler, CannedProvider, MockRecordRepository, StaticIdentityResolver, STUB_RISK_REPLY,
};

#[tokio::test]
async fn end_to_end_assessment_is_returned_and_stored() {
    let provider = CannedProvider::replying(STUB_RISK_REPLY);
    let records = Arc::new(MockRecordRepository::new());
    let identity = Arc::new(StaticIdentityResolver::signed_in("user-42"));
    let actions = ContractActions::new(identity, records.clone(), ai_client(provider.clone()).await);

    let response = actions
        .run_contract_risk_assessment(&CallerCredentials::anonymous(), RiskAssessmentRequest::new(filler(60)))
        .await;

    assert!(response.success);
    assert_eq!(response.error, None);
    assert_eq!(
        response.data,
        Some(RiskAssessmentResult {
            risk_score: 85.0,
            risky_clauses: vec!["Clause A".into()],
            suggested_replacements: vec!["Replace A".into()],
            ab5_violation: true,
        })
    );

    assert_eq!(records.risk_assessments.len(), 1);
    let stored = records.risk_assessments.iter().next().unwrap();
    assert_eq!(stored.user_id, "user-42");
    assert_eq!(stored.contract_text, filler(60));
    assert_eq!(stored.assessment_result.risk_score, 85.0);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn unauthenticated_caller_gets_no_model_call_and_no_write() {
    let provider = CannedProvider::replying(STUB_RISK_REPLY);
    let records = Arc::new(MockRecordRepository::new());
    let identity = Arc::new(StaticIdentityResolver::signed_out());
    let actions = ContractActions::new(identity.clone(), records.clone(), ai_client(provider.clone()).await);

    let response = actions
        .run_contract_risk_assessment(&CallerCredentials::anonymous(), RiskAssessmentRequest::new(filler(60)))
        .await;

    assert!(!response.success);
    assert_eq!(response.data, None);
    assert_eq!(response.error.as_deref(), Some("User not authenticated."));
    assert_eq!(identity.lookups.load(Ordering::SeqCst), 1);
    assert_eq!(provider.call_count(), 0);
    assert_eq!(records.total_records(), 0);

    let gdpr = actions
        .run_generate_gdpr_contract(
            &CallerCredentials::anonymous(),
            GdprContractRequest::new("Germany", "A storefront with customer accounts"),
        )
        .await;
    assert_eq!(gdpr.error.as_deref(), Some("User not authenticated."));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn auth_is_checked_before_validation() {
    let provider = CannedProvider::replying(STUB_RISK_REPLY);
    let actions = ContractActions::new(
        Arc::new(StaticIdentityResolver::signed_out()),
        Arc::new(MockRecordRepository::new()),
        ai_client(provider).await,
    );

    let response = actions
        .run_contract_risk_assessment(&CallerCredentials::anonymous(), RiskAssessmentRequest::new("short"))
        .await;
    assert_eq!(response.error.as_deref(), Some("User not authenticated."));
}

#[tokio::test]
async fn short_contract_fails_without_model_call() {
    let provider = CannedProvider::replying(STUB_RISK_REPLY);
    let records = Arc::new(MockRecordRepository::new());
    let actions = ContractActions::new(
        Arc::new(StaticIdentityResolver::signed_in("user-1")),
        records.clone(),
        ai_client(provider.clone()).await,
    );

    let response = actions
        .run_contract_risk_assessment(&CallerCredentials::anonymous(), RiskAssessmentRequest::new(filler(49)))
        .await;

    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("Contract text must be at least 50 characters."));
    assert_eq!(provider.call_count(), 0);
    assert_eq!(records.total_records(), 0);
}

#[tokio::test]
async fn model_failure_is_reported_and_nothing_is_stored() {
    let provider = CannedProvider::failing("connection reset");
    let records = Arc::new(MockRecordRepository::new());
    let actions = ContractActions::new(
        Arc::new(StaticIdentityResolver::signed_in("user-1")),
        records.clone(),
        ai_client(provider.clone()).await,
    );

    let response = actions
        .run_contract_risk_assessment(&CallerCredentials::anonymous(), RiskAssessmentRequest::new(filler(60)))
        .await;

    assert!(!response.success);
    assert!(response.error.unwrap().contains("connection reset"));
    assert_eq!(provider.call_count(), 1);
    assert_eq!(records.total_records(), 0);
}

#[tokio::test]
async fn unparsable_model_output_is_reported_and_nothing_is_stored() {
    let provider = CannedProvider::replying("Sorry, I can't assess this contract.");
    let records = Arc::new(MockRecordRepository::new());
    let actions = ContractActions::new(
        Arc::new(StaticIdentityResolver::signed_in("user-1")),
        records.clone(),
        ai_client(provider).await,
    );

    let response = actions
        .run_contract_risk_assessment(&CallerCredentials::anonymous(), RiskAssessmentRequest::new(filler(60)))
        .await;

    assert!(!response.success);
    assert!(response.error.unwrap().starts_with("Model output error"));
    assert_eq!(records.total_records(), 0);
}

#[tokio::test]
async fn store_failure_after_model_success_is_a_failure() {
    let provider = CannedProvider::replying(STUB_RISK_REPLY);
    let records = Arc::new(MockRecordRepository::failing());
    let actions = ContractActions::new(
        Arc::new(StaticIdentityResolver::signed_in("user-1")),
        records.clone(),
        ai_client(provider.clone()).await,
    );

    let response = actions
        .run_contract_risk_assessment(&CallerCredentials::anonymous(), RiskAssessmentRequest::new(filler(60)))
        .await;

    assert!(!response.success);
    assert_eq!(response.data, None);
    assert!(response.error.unwrap().contains("simulated write failure"));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn gdpr_contract_is_returned_and_stored_for_caller() {
    let provider = CannedProvider::replying(r#"{"contractText": "WEB DEVELOPMENT AGREEMENT ..."}"#);
    let records = Arc::new(MockRecordRepository::new());
    let actions = ContractActions::new(
        Arc::new(StaticIdentityResolver::signed_in("user-7")),
        records.clone(),
        ai_client(provider).await,
    );

    let request = GdprContractRequest::new("France", "Booking site for a small hotel chain");
    let response = actions
        .run_generate_gdpr_contract(&CallerCredentials::anonymous(), request.clone())
        .await;

    assert!(response.success);
    assert_eq!(response.data.unwrap().contract_text, "WEB DEVELOPMENT AGREEMENT ...");

    assert_eq!(records.gdpr_contracts.len(), 1);
    let stored = records.gdpr_contracts.iter().next().unwrap();
    assert_eq!(stored.user_id, "user-7");
    assert_eq!(stored.client_location, request.client_location);
    assert_eq!(stored.web_development_details, request.web_development_details);
}

#[tokio::test]
async fn bound_actions_forward_credentials() {
    let provider = CannedProvider::replying(STUB_RISK_REPLY);
    let records = Arc::new(MockRecordRepository::new());
    let actions = Arc::new(ContractActions::new(
        Arc::new(StaticIdentityResolver::signed_in("user-3")),
        records.clone(),
        ai_client(provider).await,
    ));

    let api = BoundActions::new(actions, CallerCredentials::bearer("token"));
    let response = api.run_contract_risk_assessment(RiskAssessmentRequest::new(filler(80))).await;

    assert!(response.success);
    assert_eq!(records.risk_assessments.len(), 1);
}

#[tokio::test]
async fn gdpr_model_failure_is_reported_and_nothing_is_stored() {
    let provider = CannedProvider::failing("upstream timeout");
    let records = Arc::new(MockRecordRepository::new());
    let actions = ContractActions::new(
        Arc::new(StaticIdentityResolver::signed_in("user-1")),
        records.clone(),
        ai_client(provider.clone()).await,
    );

    let response = actions
        .run_generate_gdpr_contract(
            &CallerCredentials::anonymous(),
            GdprContractRequest::new("Spain", "Marketplace for handmade furniture"),
        )
        .await;

    assert!(!response.success);
    assert_eq!(response.data, None);
    assert!(response.error.unwrap().contains("upstream timeout"));
    assert_eq!(provider.call_count(), 1);
    assert_eq!(records.total_records(), 0);
}

#[tokio::test]
async fn blank_generated_contract_is_a_failure_and_nothing_is_stored() {
    let provider = CannedProvider::replying(r#"{"contractText": "   "}"#);
    let records = Arc::new(MockRecordRepository::new());
    let actions = ContractActions::new(
        Arc::new(StaticIdentityResolver::signed_in("user-1")),
        records.clone(),
        ai_client(provider.clone()).await,
    );

    let response = actions
        .run_generate_gdpr_contract(
            &CallerCredentials::anonymous(),
            GdprContractRequest::new("Italy", "Restaurant site with online reservations"),
        )
        .await;

    assert!(!response.success);
    assert_eq!(response.data, None);
    assert!(response.error.unwrap().starts_with("Model output error"));
    assert_eq!(provider.call_count(), 1);
    assert_eq!(records.total_records(), 0);
}
