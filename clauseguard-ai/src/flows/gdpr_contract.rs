//! Generates a web development contract with GDPR data clauses for the client's location.
//!
//! The prompt asks for five clause categories; whether the model actually includes them
//! is not checked here.

use std::collections::HashMap;

use clauseguard_common::models::{GdprContractRequest, GdprContractResult};
use clauseguard_common::Error;

use crate::flow::{Flow, FlowDefinition};
use crate::models::{FieldType, SchemaField};
use crate::prompt::PromptTemplate;
use crate::schema::OutputSchema;

const PROMPT: &str = r#"You are a legal expert specializing in GDPR compliance for web development contracts.

Using the client's location, draft a web development contract that includes GDPR-compliant data clauses.

Client Location: {{{clientLocation}}}
Web Development Details: {{{webDevelopmentDetails}}}

The contract must include clauses covering:
- Data processing agreement
- Data security measures
- User consent
- Data breach notification
- Rights of data subjects

The contract should be comprehensive and legally sound. Return it as the "contractText" field of a JSON object.
"#;

/// Clause categories the prompt asks for.
pub const REQUIRED_CLAUSE_CATEGORIES: [&str; 5] = [
    "Data processing agreement",
    "Data security measures",
    "User consent",
    "Data breach notification",
    "Rights of data subjects",
];

pub struct GdprContract;

pub type GdprContractFlow = Flow<GdprContract>;

impl FlowDefinition for GdprContract {
    type Input = GdprContractRequest;
    type Output = GdprContractResult;

    fn name() -> &'static str {
        "generateGdprContract"
    }

    fn prompt() -> PromptTemplate {
        PromptTemplate::new("generateGdprContractPrompt", PROMPT)
    }

    fn output_schema() -> OutputSchema {
        OutputSchema::new(
            "gdpr_contract",
            "A generated web development contract",
            vec![SchemaField::required(
                "contractText",
                FieldType::String,
                "The generated web development contract with GDPR clauses.",
            )],
        )
    }

    fn validate_input(input: &GdprContractRequest) -> Result<(), Error> {
        input.validate()
    }

    fn prompt_vars(input: &GdprContractRequest) -> HashMap<&'static str, &str> {
        HashMap::from([
            ("clientLocation", input.client_location.as_str()),
            ("webDevelopmentDetails", input.web_development_details.as_str()),
        ])
    }

    fn validate_output(output: &GdprContractResult) -> Result<(), Error> {
        output.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::AiClient;
    use crate::provider::Provider;
    use std::sync::Arc;

    #[test]
    fn prompt_lists_every_clause_category() {
        let flow = GdprContractFlow::new(Arc::new(AiClient::new(Arc::new(Provider::new()), "none")));
        let prompt = flow
            .render_prompt(&GdprContractRequest::new("Germany", "A shop built on a headless CMS"))
            .unwrap();
        assert!(prompt.contains("Client Location: Germany"));
        assert!(prompt.contains("Web Development Details: A shop built on a headless CMS"));
        for category in REQUIRED_CLAUSE_CATEGORIES {
            assert!(prompt.contains(category), "missing {}", category);
        }
    }
}
