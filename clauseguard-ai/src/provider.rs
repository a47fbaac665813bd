use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::models::ProviderConfig;
use crate::traits::{GenerationRequest, ModelProvider};

const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Parses a provider reply body, surfacing `{"error": {"message": ...}}` payloads.
fn parse_api_reply(response_text: &str) -> anyhow::Result<Value> {
    let data = match serde_json::from_str::<Value>(response_text) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to parse API response as JSON: {:?}", e);
            tracing::error!("Response text: {}", response_text);
            return Err(anyhow::anyhow!("API returned non-JSON response: {}", e));
        }
    };

    if let Some(error) = data.get("error") {
        tracing::error!("API returned error: {:?}", error);
        let error_message = error
            .get("message")
            .and_then(|m| m.as_str())
            .or_else(|| error.as_str())
            .unwrap_or("Unknown error");
        return Err(anyhow::anyhow!("API error: {}", error_message));
    }

    Ok(data)
}

/// OpenAI provider implementation (chat completions with a JSON-schema response format)
pub struct OpenAIProvider {
    config: ProviderConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = Client::new();
        Self { config, client }
    }

    fn build_payload(&self, request: &GenerationRequest) -> Value {
        let mut messages = Vec::new();
        if let Some(system_prompt) = self.config.options.get("system_prompt") {
            messages.push(json!({ "role": "system", "content": system_prompt }));
        }
        messages.push(json!({ "role": "user", "content": request.prompt }));

        let mut payload = json!({
            "model": self.config.default_model,
            "messages": messages,
            "max_tokens": self.config.max_tokens(DEFAULT_MAX_TOKENS),
        });

        if let Some(temperature) = self.config.temperature() {
            payload["temperature"] = json!(temperature);
        }

        if let Some(schema) = &request.output_schema {
            payload["response_format"] = json!({
                "type": "json_schema",
                "json_schema": {
                    "name": schema.name,
                    "description": schema.description,
                    "schema": schema.to_json_schema(),
                    "strict": true,
                }
            });
        }

        payload
    }
}

#[async_trait]
impl ModelProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<String> {
        let api_base = self.config.api_base.clone().unwrap_or_else(|| {
            "https://api.openai.com/v1".to_string()
        });

        let payload = self.build_payload(request);
        tracing::info!("Making API call to {}/chat/completions (model={})", api_base, self.config.default_model);

        let response = self.client
            .post(format!("{}/chat/completions", api_base))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&payload)
            .send()
            .await?;

        let response_text = response.text().await?;
        tracing::debug!("Raw API response: {}", response_text);
        let data = parse_api_reply(&response_text)?;

        let choices = match data.get("choices").and_then(|c| c.as_array()) {
            Some(choices) => choices,
            None => {
                tracing::error!("Response missing 'choices' array: {:?}", data);
                return Err(anyhow::anyhow!("Response missing 'choices' array"));
            }
        };

        let first = choices.first().ok_or_else(|| anyhow::anyhow!("No completions returned"))?;

        if let Some(refusal) = first.pointer("/message/refusal").and_then(|r| r.as_str()) {
            return Err(anyhow::anyhow!("Model refused the request: {}", refusal));
        }

        let content = first
            .pointer("/message/content")
            .and_then(|c| c.as_str())
            .ok_or_else(|| {
                tracing::error!("First choice missing message content: {:?}", first);
                anyhow::anyhow!("Response message missing 'content'")
            })?
            .to_string();

        Ok(content)
    }
}

/// Anthropic provider implementation (messages API; the schema travels in the system prompt)
pub struct AnthropicProvider {
    config: ProviderConfig,
    client: Client,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = Client::new();
        Self { config, client }
    }

    fn build_payload(&self, request: &GenerationRequest) -> Value {
        let mut system_parts: Vec<String> = Vec::new();
        if let Some(system_prompt) = self.config.options.get("system_prompt") {
            system_parts.push(system_prompt.clone());
        }
        if let Some(schema) = &request.output_schema {
            system_parts.push(format!(
                "Respond with a single JSON object and nothing else. It must conform to this JSON schema:\n{}",
                schema.to_json_schema()
            ));
        }

        let mut payload = json!({
            "model": self.config.default_model,
            "max_tokens": self.config.max_tokens(DEFAULT_MAX_TOKENS),
            "messages": [{ "role": "user", "content": request.prompt }],
        });

        if !system_parts.is_empty() {
            payload["system"] = json!(system_parts.join("\n\n"));
        }
        if let Some(temperature) = self.config.temperature() {
            payload["temperature"] = json!(temperature);
        }

        payload
    }
}

#[async_trait]
impl ModelProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<String> {
        let api_base = self.config.api_base.clone().unwrap_or_else(|| {
            "https://api.anthropic.com/v1".to_string()
        });

        let payload = self.build_payload(request);
        tracing::info!("Making API call to {}/messages (model={})", api_base, self.config.default_model);

        let response = self.client
            .post(format!("{}/messages", api_base))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&payload)
            .send()
            .await?;

        let response_text = response.text().await?;
        tracing::debug!("Raw API response: {}", response_text);
        let data = parse_api_reply(&response_text)?;

        let content = data["content"].as_array()
            .ok_or_else(|| anyhow::anyhow!("Invalid response format"))?;

        let text: String = content
            .iter()
            .filter(|item| item["type"].as_str() == Some("text"))
            .filter_map(|item| item["text"].as_str())
            .collect();

        if text.is_empty() {
            return Err(anyhow::anyhow!("Response contained no text blocks"));
        }

        Ok(text)
    }
}

/// Google Gemini provider implementation (generateContent with a response schema)
pub struct GeminiProvider {
    config: ProviderConfig,
    client: Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = Client::new();
        Self { config, client }
    }

    fn build_payload(&self, request: &GenerationRequest) -> Value {
        let mut generation_config = json!({
            "maxOutputTokens": self.config.max_tokens(DEFAULT_MAX_TOKENS),
        });
        if let Some(schema) = &request.output_schema {
            generation_config["responseMimeType"] = json!("application/json");
            generation_config["responseSchema"] = schema.to_gemini_schema();
        }
        if let Some(temperature) = self.config.temperature() {
            generation_config["temperature"] = json!(temperature);
        }

        let mut payload = json!({
            "contents": [{ "role": "user", "parts": [{ "text": request.prompt }] }],
            "generationConfig": generation_config,
        });

        if let Some(system_prompt) = self.config.options.get("system_prompt") {
            payload["systemInstruction"] = json!({ "parts": [{ "text": system_prompt }] });
        }

        payload
    }
}

#[async_trait]
impl ModelProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<String> {
        let api_base = self.config.api_base.clone().unwrap_or_else(|| {
            "https://generativelanguage.googleapis.com/v1beta".to_string()
        });
        let url = format!("{}/models/{}:generateContent", api_base, self.config.default_model);

        let payload = self.build_payload(request);
        tracing::info!("Making API call to {}", url);

        let response = self.client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let response_text = response.text().await?;
        tracing::debug!("Raw API response: {}", response_text);
        let data = parse_api_reply(&response_text)?;

        let parts = data
            .pointer("/candidates/0/content/parts")
            .and_then(|p| p.as_array())
            .ok_or_else(|| {
                let reason = data
                    .pointer("/promptFeedback/blockReason")
                    .and_then(|r| r.as_str())
                    .unwrap_or("no candidates");
                anyhow::anyhow!("Response contained no content: {}", reason)
            })?;

        let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
        if text.is_empty() {
            return Err(anyhow::anyhow!("Response contained no text parts"));
        }

        Ok(text)
    }
}

/// Factory and registry for AI providers
pub struct Provider {
    providers: Arc<RwLock<HashMap<String, Arc<dyn ModelProvider>>>>,
}

impl Default for Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider {
    /// Create a new provider registry
    pub fn new() -> Self {
        Self {
            providers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a new provider
    pub async fn register<P: ModelProvider + 'static>(&self, provider: P) {
        self.register_arc(Arc::new(provider)).await;
    }

    pub async fn register_arc(&self, provider: Arc<dyn ModelProvider>) {
        let mut providers = self.providers.write().await;
        providers.insert(provider.name().to_string(), provider);
    }

    /// Get a provider by name
    pub async fn get(&self, name: &str) -> Option<Arc<dyn ModelProvider>> {
        let providers = self.providers.read().await;
        providers.get(name).cloned()
    }

    /// Get all registered provider names, sorted
    pub async fn get_all(&self) -> Vec<String> {
        let providers = self.providers.read().await;
        let mut names: Vec<String> = providers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Build a provider from its `provider_type`
    pub fn create(config: ProviderConfig) -> anyhow::Result<Arc<dyn ModelProvider>> {
        match config.provider_type.to_lowercase().as_str() {
            "openai" => Ok(Arc::new(OpenAIProvider::new(config))),
            "anthropic" => Ok(Arc::new(AnthropicProvider::new(config))),
            "gemini" | "google" | "googleai" => Ok(Arc::new(GeminiProvider::new(config))),
            other => Err(anyhow::anyhow!("Unsupported model provider: {}", other)),
        }
    }

    /// Default model name for a provider type
    pub fn default_model_for(provider_type: &str) -> Option<&'static str> {
        match provider_type.to_lowercase().as_str() {
            "openai" => Some("gpt-4o-mini"),
            "anthropic" => Some("claude-3-5-sonnet-latest"),
            "gemini" | "google" | "googleai" => Some("gemini-2.0-flash"),
            _ => None,
        }
    }
}
