// File: clauseguard-core/src/repositories/postgres/records.rs

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{query_as, PgPool};

use clauseguard_common::error::Error;
use clauseguard_common::models::record::{NewGdprContractRecord, NewRiskAssessmentRecord, RecordReceipt};
use clauseguard_common::traits::repository_traits::RecordRepository;

pub struct PostgresRecordRepository {
    pool: PgPool,
}

impl PostgresRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordRepository for PostgresRecordRepository {
    async fn insert_risk_assessment(&self, record: &NewRiskAssessmentRecord) -> Result<RecordReceipt, Error> {
        query_as::<_, RecordReceipt>(
            r#"
            INSERT INTO risk_assessments (
                record_id, user_id, contract_text, assessment_result
            ) VALUES ($1, $2, $3, $4)
            RETURNING record_id, created_at
            "#,
        )
        .bind(record.record_id)
        .bind(&record.user_id)
        .bind(&record.contract_text)
        .bind(Json(&record.assessment_result))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Error::Persistence(format!("failed to store risk assessment: {}", e)))
    }

    async fn insert_gdpr_contract(&self, record: &NewGdprContractRecord) -> Result<RecordReceipt, Error> {
        query_as::<_, RecordReceipt>(
            r#"
            INSERT INTO gdpr_contracts (
                record_id, user_id, client_location, web_development_details, generated_contract
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING record_id, created_at
            "#,
        )
        .bind(record.record_id)
        .bind(&record.user_id)
        .bind(&record.client_location)
        .bind(&record.web_development_details)
        .bind(Json(&record.generated_contract))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Error::Persistence(format!("failed to store GDPR contract: {}", e)))
    }
}
