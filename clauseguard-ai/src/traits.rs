use async_trait::async_trait;

use crate::schema::OutputSchema;

/// One outbound model call: a rendered prompt plus the shape the reply must take.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub output_schema: Option<OutputSchema>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            output_schema: None,
        }
    }

    pub fn with_schema(mut self, schema: OutputSchema) -> Self {
        self.output_schema = Some(schema);
        self
    }
}

/// A hosted language model.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Returns the raw text of the model's reply.
    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<String>;
}
