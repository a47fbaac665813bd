use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use clauseguard_common::Error;

use crate::client::AiClient;
use crate::prompt::PromptTemplate;
use crate::schema::OutputSchema;
use crate::traits::GenerationRequest;

/// Static description of a flow: its input checks, prompt, and output contract.
pub trait FlowDefinition: Send + Sync + 'static {
    type Input: Send + Sync;
    type Output: DeserializeOwned + Send;

    fn name() -> &'static str;

    fn prompt() -> PromptTemplate;

    fn output_schema() -> OutputSchema;

    /// Runs before any model call.
    fn validate_input(input: &Self::Input) -> Result<(), Error>;

    fn prompt_vars(input: &Self::Input) -> HashMap<&'static str, &str>;

    /// Checks the schema cannot express (ranges, non-empty text).
    fn validate_output(output: &Self::Output) -> Result<(), Error>;
}

/// A typed request -> response transformation around exactly one model call.
///
/// No retries: a provider failure or an unparsable reply ends the run.
pub struct Flow<D: FlowDefinition> {
    client: Arc<AiClient>,
    prompt: PromptTemplate,
    schema: OutputSchema,
    _definition: PhantomData<fn() -> D>,
}

impl<D: FlowDefinition> Flow<D> {
    pub fn new(client: Arc<AiClient>) -> Self {
        Self {
            client,
            prompt: D::prompt(),
            schema: D::output_schema(),
            _definition: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        D::name()
    }

    pub fn output_schema(&self) -> &OutputSchema {
        &self.schema
    }

    /// Renders the prompt for `input` without calling the model.
    pub fn render_prompt(&self, input: &D::Input) -> Result<String, Error> {
        self.prompt.render(&D::prompt_vars(input))
    }

    pub async fn run(&self, input: &D::Input) -> Result<D::Output, Error> {
        D::validate_input(input)?;

        let request = GenerationRequest::new(self.render_prompt(input)?)
            .with_schema(self.schema.clone());

        info!("Running flow '{}'", D::name());
        let raw = self
            .client
            .generate(&request)
            .await
            .map_err(|e| Error::Provider(e.to_string()))?;
        debug!("Flow '{}' raw model output: {}", D::name(), raw);

        let output: D::Output = self.schema.parse(&raw)?;
        D::validate_output(&output)?;

        info!("Flow '{}' finished", D::name());
        Ok(output)
    }
}
