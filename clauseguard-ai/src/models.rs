use serde::{Serialize, Deserialize};
use std::collections::HashMap;

/// Configuration for an AI provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The type of provider (gemini, openai, anthropic)
    pub provider_type: String,

    /// Base URL for API requests
    pub api_base: Option<String>,

    /// API key for authentication
    pub api_key: String,

    /// Default model to use with this provider
    pub default_model: String,

    /// Additional provider-specific configuration options
    pub options: HashMap<String, String>,
}

impl ProviderConfig {
    pub fn new(provider_type: &str, api_key: &str, default_model: &str) -> Self {
        Self {
            provider_type: provider_type.to_string(),
            api_base: None,
            api_key: api_key.to_string(),
            default_model: default_model.to_string(),
            options: HashMap::new(),
        }
    }

    pub fn with_api_base(mut self, api_base: Option<String>) -> Self {
        self.api_base = api_base;
        self
    }

    /// Sets a provider option when a value is given.
    pub fn with_option(mut self, key: &str, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.options.insert(key.to_string(), value);
        }
        self
    }

    /// `max_tokens` option, falling back to `default`.
    pub fn max_tokens(&self, default: u32) -> u32 {
        self.options
            .get("max_tokens")
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    pub fn temperature(&self) -> Option<f64> {
        self.options.get("temperature").and_then(|v| v.parse().ok())
    }
}

/// Value type of an output field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    String,
    Number,
    Boolean,
    StringArray,
}

/// Represents one field of a structured model reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaField {
    /// Name of the field as it appears in the JSON reply
    pub name: String,

    /// Description handed to the model
    pub description: String,

    pub field_type: FieldType,

    /// Whether the model must always emit this field
    pub required: bool,
}

impl SchemaField {
    pub fn required(name: &str, field_type: FieldType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            field_type,
            required: true,
        }
    }
}
