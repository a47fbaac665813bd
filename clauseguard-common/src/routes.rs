//! HTTP paths shared by the server router and the HTTP client.

pub const RISK_ASSESSMENT_PATH: &str = "/api/actions/contract-risk-assessment";
pub const GDPR_CONTRACT_PATH: &str = "/api/actions/generate-gdpr-contract";
pub const HEALTH_PATH: &str = "/healthz";
