use async_trait::async_trait;

use crate::error::Error;
use crate::models::record::{NewGdprContractRecord, NewRiskAssessmentRecord, RecordReceipt};

/// Append-only store for action results, namespaced by user id.
///
/// Records are write-once: there are no update or delete operations.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    async fn insert_risk_assessment(&self, record: &NewRiskAssessmentRecord) -> Result<RecordReceipt, Error>;

    async fn insert_gdpr_contract(&self, record: &NewGdprContractRecord) -> Result<RecordReceipt, Error>;
}
