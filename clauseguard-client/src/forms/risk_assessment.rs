// clauseguard-client/src/forms/risk_assessment.rs

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use clauseguard_common::models::{FieldError, RiskAssessmentRequest, RiskAssessmentResult};
use clauseguard_common::traits::ContractActionsApi;

use super::{lock, InFlight, SubmitOutcome};
use crate::notifications::{NotificationVariant, Notifier};

pub const SUCCESS_TITLE: &str = "Assessment Complete";
pub const SUCCESS_DESCRIPTION: &str = "Contract risk assessment finished successfully.";
pub const FAILURE_TITLE: &str = "Assessment Failed";

/// Contract text input plus the last assessment it produced.
pub struct RiskAssessmentForm {
    api: Arc<dyn ContractActionsApi>,
    notifier: Arc<Notifier>,
    contract_text: Mutex<String>,
    result: Mutex<Option<RiskAssessmentResult>>,
    in_flight: AtomicBool,
}

impl RiskAssessmentForm {
    pub fn new(api: Arc<dyn ContractActionsApi>, notifier: Arc<Notifier>) -> Self {
        Self {
            api,
            notifier,
            contract_text: Mutex::new(String::new()),
            result: Mutex::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Replaces the contract text. Refused (returns `false`) while a submission is running.
    pub fn set_contract_text(&self, text: impl Into<String>) -> bool {
        let mut current = lock(&self.contract_text);
        if self.is_submitting() {
            debug!("Risk assessment in flight; contract text left unchanged");
            return false;
        }
        *current = text.into();
        true
    }

    pub fn contract_text(&self) -> String {
        lock(&self.contract_text).clone()
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        self.request().field_errors()
    }

    /// True while a submission is running. Inputs should be disabled meanwhile.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn result(&self) -> Option<RiskAssessmentResult> {
        lock(&self.result).clone()
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_guard) = InFlight::try_begin(&self.in_flight) else {
            debug!("Risk assessment already in flight; ignoring submit");
            return SubmitOutcome::Busy;
        };

        let request = self.request();
        let errors = request.field_errors();
        if !errors.is_empty() {
            return SubmitOutcome::Invalid(errors);
        }
        *lock(&self.result) = None;

        match self.api.run_contract_risk_assessment(request).await.into_result() {
            Ok(result) => {
                *lock(&self.result) = Some(result);
                self.notifier
                    .push(SUCCESS_TITLE, SUCCESS_DESCRIPTION, NotificationVariant::Default);
                SubmitOutcome::Succeeded
            }
            Err(message) => {
                warn!("Risk assessment failed: {}", message);
                self.notifier
                    .push(FAILURE_TITLE, message.clone(), NotificationVariant::Destructive);
                SubmitOutcome::Failed(message)
            }
        }
    }

    fn request(&self) -> RiskAssessmentRequest {
        RiskAssessmentRequest::new(self.contract_text())
    }
}
