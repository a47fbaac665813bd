use std::sync::Arc;

use tracing::debug;

use crate::provider::Provider;
use crate::traits::{GenerationRequest, ModelProvider};

/// Represents a client for AI services
pub struct AiClient {
    /// Provider registry for different AI models
    provider: Arc<Provider>,

    /// Default provider to use
    default_provider: String,
}

impl AiClient {
    /// Create a new AI client with the given registry
    pub fn new(provider: Arc<Provider>, default_provider: impl Into<String>) -> Self {
        Self {
            provider,
            default_provider: default_provider.into(),
        }
    }

    /// Client backed by a single provider, which also becomes the default
    pub async fn with_provider(model: Arc<dyn ModelProvider>) -> Self {
        let name = model.name().to_string();
        let provider = Arc::new(Provider::new());
        provider.register_arc(model).await;
        Self::new(provider, name)
    }

    /// Set the default provider
    pub fn set_default_provider(&mut self, provider: impl Into<String>) {
        self.default_provider = provider.into();
    }

    pub fn default_provider(&self) -> &str {
        &self.default_provider
    }

    /// Get the provider registry
    pub fn provider(&self) -> Arc<Provider> {
        self.provider.clone()
    }

    /// Single model call through the default provider
    pub async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<String> {
        let provider = self.get_provider(None).await?;
        debug!("Generating with provider '{}'", provider.name());
        provider.generate(request).await
    }

    /// Single model call through a named provider
    pub async fn generate_with(&self, name: &str, request: &GenerationRequest) -> anyhow::Result<String> {
        let provider = self.get_provider(Some(name)).await?;
        provider.generate(request).await
    }

    /// Get a provider by name or the default provider
    async fn get_provider(&self, name: Option<&str>) -> anyhow::Result<Arc<dyn ModelProvider>> {
        if let Some(provider_name) = name {
            // If a specific provider is requested, use that
            return self.provider.get(provider_name).await
                .ok_or_else(|| anyhow::anyhow!("Provider not found: {}", provider_name));
        }

        if let Some(provider) = self.provider.get(&self.default_provider).await {
            return Ok(provider);
        }

        // If default provider not found, fall back to the first registered one
        let providers = self.provider.get_all().await;
        let first_provider = providers
            .first()
            .ok_or_else(|| anyhow::anyhow!("No AI providers configured"))?;

        self.provider.get(first_provider).await
            .ok_or_else(|| anyhow::anyhow!("Provider not found: {}", first_provider))
    }
}
