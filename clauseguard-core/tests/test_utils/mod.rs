// File: clauseguard-core/tests/test_utils/mod.rs
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use clauseguard_ai::traits::{GenerationRequest, ModelProvider};
use clauseguard_ai::AiClient;
use clauseguard_common::models::{
    CallerCredentials, Identity, NewGdprContractRecord, NewRiskAssessmentRecord, RecordReceipt,
};
use clauseguard_common::traits::{IdentityResolver, RecordRepository};
use clauseguard_core::Error;

pub const STUB_RISK_REPLY: &str = r#"{"riskScore": 85, "riskyClauses": ["Clause A"], "suggestedReplacements": ["Replace A"], "ab5Violation": true}"#;

/// DashMap-backed record store. Can be switched into a failing mode.
#[derive(Default)]
pub struct MockRecordRepository {
    pub risk_assessments: DashMap<Uuid, NewRiskAssessmentRecord>,
    pub gdpr_contracts: DashMap<Uuid, NewGdprContractRecord>,
    pub fail_writes: AtomicBool,
}

impl MockRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let repo = Self::default();
        repo.fail_writes.store(true, Ordering::SeqCst);
        repo
    }

    pub fn total_records(&self) -> usize {
        self.risk_assessments.len() + self.gdpr_contracts.len()
    }

    fn check(&self) -> Result<(), Error> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Persistence("simulated write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordRepository for MockRecordRepository {
    async fn insert_risk_assessment(&self, record: &NewRiskAssessmentRecord) -> Result<RecordReceipt, Error> {
        self.check()?;
        self.risk_assessments.insert(record.record_id, record.clone());
        Ok(RecordReceipt { record_id: record.record_id, created_at: Utc::now() })
    }

    async fn insert_gdpr_contract(&self, record: &NewGdprContractRecord) -> Result<RecordReceipt, Error> {
        self.check()?;
        self.gdpr_contracts.insert(record.record_id, record.clone());
        Ok(RecordReceipt { record_id: record.record_id, created_at: Utc::now() })
    }
}

/// Always resolves to the same identity (or to nobody) and counts lookups.
pub struct StaticIdentityResolver {
    identity: Option<Identity>,
    pub lookups: AtomicUsize,
}

impl StaticIdentityResolver {
    pub fn signed_in(user_id: &str) -> Self {
        Self { identity: Some(Identity::new(user_id)), lookups: AtomicUsize::new(0) }
    }

    pub fn signed_out() -> Self {
        Self { identity: None, lookups: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl IdentityResolver for StaticIdentityResolver {
    async fn resolve(&self, _credentials: &CallerCredentials) -> Result<Option<Identity>, Error> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.identity.clone())
    }
}

/// Model stub returning a canned reply (or error) and counting calls.
pub struct CannedProvider {
    reply: Result<String, String>,
    pub calls: AtomicUsize,
}

impl CannedProvider {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self { reply: Ok(reply.to_string()), calls: AtomicUsize::new(0) })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self { reply: Err(message.to_string()), calls: AtomicUsize::new(0) })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelProvider for CannedProvider {
    fn name(&self) -> &str {
        "canned"
    }

    async fn generate(&self, _request: &GenerationRequest) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(msg) => Err(anyhow::anyhow!(msg.clone())),
        }
    }
}

pub async fn ai_client(provider: Arc<CannedProvider>) -> Arc<AiClient> {
    Arc::new(AiClient::with_provider(provider).await)
}

pub fn filler(len: usize) -> String {
    "x".repeat(len)
}
