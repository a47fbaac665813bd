// clauseguard-client/src/forms/gdpr_contract.rs

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use clauseguard_common::models::{FieldError, GdprContractRequest, GdprContractResult};
use clauseguard_common::traits::ContractActionsApi;

use super::{lock, InFlight, SubmitOutcome};
use crate::notifications::{NotificationVariant, Notifier};

pub const SUCCESS_TITLE: &str = "Contract Generated";
pub const SUCCESS_DESCRIPTION: &str = "GDPR-compliant contract generated successfully.";
pub const FAILURE_TITLE: &str = "Generation Failed";

#[derive(Default)]
struct Fields {
    client_location: String,
    web_development_details: String,
}

pub struct GdprContractForm {
    api: Arc<dyn ContractActionsApi>,
    notifier: Arc<Notifier>,
    fields: Mutex<Fields>,
    result: Mutex<Option<GdprContractResult>>,
    in_flight: AtomicBool,
}

impl GdprContractForm {
    pub fn new(api: Arc<dyn ContractActionsApi>, notifier: Arc<Notifier>) -> Self {
        Self {
            api,
            notifier,
            fields: Mutex::new(Fields::default()),
            result: Mutex::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Both setters are refused (return `false`) while a submission is running.
    pub fn set_client_location(&self, location: impl Into<String>) -> bool {
        self.edit(|fields| fields.client_location = location.into())
    }

    pub fn set_web_development_details(&self, details: impl Into<String>) -> bool {
        self.edit(|fields| fields.web_development_details = details.into())
    }

    fn edit(&self, apply: impl FnOnce(&mut Fields)) -> bool {
        let mut fields = lock(&self.fields);
        if self.is_submitting() {
            debug!("GDPR contract generation in flight; fields left unchanged");
            return false;
        }
        apply(&mut fields);
        true
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        self.request().field_errors()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn result(&self) -> Option<GdprContractResult> {
        lock(&self.result).clone()
    }

    /// The generated contract text, ready to be copied elsewhere.
    pub fn contract_text(&self) -> Option<String> {
        lock(&self.result).as_ref().map(|r| r.contract_text.clone())
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_guard) = InFlight::try_begin(&self.in_flight) else {
            debug!("GDPR contract generation already in flight; ignoring submit");
            return SubmitOutcome::Busy;
        };

        let request = self.request();
        let errors = request.field_errors();
        if !errors.is_empty() {
            return SubmitOutcome::Invalid(errors);
        }
        *lock(&self.result) = None;

        match self.api.run_generate_gdpr_contract(request).await.into_result() {
            Ok(result) => {
                *lock(&self.result) = Some(result);
                self.notifier
                    .push(SUCCESS_TITLE, SUCCESS_DESCRIPTION, NotificationVariant::Default);
                SubmitOutcome::Succeeded
            }
            Err(message) => {
                warn!("GDPR contract generation failed: {}", message);
                self.notifier
                    .push(FAILURE_TITLE, message.clone(), NotificationVariant::Destructive);
                SubmitOutcome::Failed(message)
            }
        }
    }

    fn request(&self) -> GdprContractRequest {
        let fields = lock(&self.fields);
        GdprContractRequest::new(
            fields.client_location.clone(),
            fields.web_development_details.clone(),
        )
    }
}
