pub mod client;
pub mod flow;
pub mod flows;
pub mod models;
pub mod prompt;
pub mod provider;
pub mod schema;
pub mod traits;

// Re-export public APIs
pub use client::AiClient;
pub use flow::{Flow, FlowDefinition};
pub use flows::{GdprContractFlow, RiskAssessmentFlow};
pub use prompt::PromptTemplate;
pub use provider::Provider;
pub use schema::OutputSchema;
