//! Contract risk assessment: scores a contract 0..100, lists risky clauses with safer
//! replacements, and flags likely California AB-5 violations.

use std::collections::HashMap;

use clauseguard_common::models::{RiskAssessmentRequest, RiskAssessmentResult};
use clauseguard_common::Error;

use crate::flow::{Flow, FlowDefinition};
use crate::models::{FieldType, SchemaField};
use crate::prompt::PromptTemplate;
use crate::schema::OutputSchema;

const PROMPT: &str = r#"You are an AI-powered legal assistant specializing in contract risk assessment.

Analyze the contract text below and identify potential legal risks, paying particular attention to California AB-5 worker classification rules.

Give a risk score from 0 to 100, where 100 is the riskiest. List the specific clauses you consider risky and, for each, suggest a safer alternative.

Contract Text:
{{{contractText}}}

Output in JSON format:
{
  "riskScore": number,
  "riskyClauses": string[],
  "suggestedReplacements": string[],
  "ab5Violation": boolean
}
"#;

pub struct RiskAssessment;

pub type RiskAssessmentFlow = Flow<RiskAssessment>;

impl FlowDefinition for RiskAssessment {
    type Input = RiskAssessmentRequest;
    type Output = RiskAssessmentResult;

    fn name() -> &'static str {
        "assessContractRisk"
    }

    fn prompt() -> PromptTemplate {
        PromptTemplate::new("assessContractRiskPrompt", PROMPT)
    }

    fn output_schema() -> OutputSchema {
        OutputSchema::new(
            "contract_risk_assessment",
            "Risk assessment of a contract",
            vec![
                SchemaField::required(
                    "riskScore",
                    FieldType::Number,
                    "A risk score from 0 to 100, with 100 being the riskiest.",
                ),
                SchemaField::required(
                    "riskyClauses",
                    FieldType::StringArray,
                    "Specific clauses identified as potentially risky.",
                ),
                SchemaField::required(
                    "suggestedReplacements",
                    FieldType::StringArray,
                    "Suggested replacements for the risky clauses.",
                ),
                SchemaField::required(
                    "ab5Violation",
                    FieldType::Boolean,
                    "Whether the contract violates California AB-5 laws.",
                ),
            ],
        )
    }

    fn validate_input(input: &RiskAssessmentRequest) -> Result<(), Error> {
        input.validate()
    }

    fn prompt_vars(input: &RiskAssessmentRequest) -> HashMap<&'static str, &str> {
        HashMap::from([("contractText", input.contract_text.as_str())])
    }

    fn validate_output(output: &RiskAssessmentResult) -> Result<(), Error> {
        output.validate()
    }
}
