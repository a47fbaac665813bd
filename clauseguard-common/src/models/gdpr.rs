// File: clauseguard-common/src/models/gdpr.rs

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::validation::{check_min_chars, into_result, FieldError};

pub const MIN_CLIENT_LOCATION_CHARS: usize = 2;
pub const MIN_PROJECT_DETAILS_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GdprContractRequest {
    /// Country or region of the client, e.g. "Germany".
    #[serde(default)]
    pub client_location: String,
    #[serde(default)]
    pub web_development_details: String,
}

impl GdprContractRequest {
    pub fn new(client_location: impl Into<String>, web_development_details: impl Into<String>) -> Self {
        Self {
            client_location: client_location.into(),
            web_development_details: web_development_details.into(),
        }
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        check_min_chars(
            &mut errors,
            "clientLocation",
            &self.client_location,
            MIN_CLIENT_LOCATION_CHARS,
            "Client location must be at least 2 characters.",
        );
        check_min_chars(
            &mut errors,
            "webDevelopmentDetails",
            &self.web_development_details,
            MIN_PROJECT_DETAILS_CHARS,
            "Project details must be at least 20 characters.",
        );
        errors
    }

    pub fn validate(&self) -> Result<(), Error> {
        into_result(self.field_errors())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GdprContractResult {
    pub contract_text: String,
}

impl GdprContractResult {
    pub fn validate(&self) -> Result<(), Error> {
        if self.contract_text.trim().is_empty() {
            return Err(Error::ModelOutput("contractText is empty".to_string()));
        }
        Ok(())
    }
}
