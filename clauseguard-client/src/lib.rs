pub mod forms;
pub mod http_client;
pub mod notifications;
pub mod risk_indicator;

pub use forms::{GdprContractForm, RiskAssessmentForm, SubmitOutcome};
pub use http_client::HttpActionsClient;
pub use notifications::{Notification, NotificationVariant, Notifier};
pub use risk_indicator::{ab5_message, RiskIndicator, RiskLevel};
