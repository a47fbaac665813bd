// clauseguard-server/src/config.rs

use std::fmt;
use std::net::SocketAddr;

use tracing::info;

use clauseguard_ai::models::ProviderConfig;
use clauseguard_ai::Provider;
use clauseguard_core::auth::DEFAULT_TOKEN_TTL_HOURS;
use clauseguard_core::crypto::TokenCipher;

pub const ENV_DATABASE_URL: &str = "CLAUSEGUARD_DATABASE_URL";
pub const ENV_SESSION_KEY: &str = "CLAUSEGUARD_SESSION_KEY";
pub const ENV_MODEL_PROVIDER: &str = "CLAUSEGUARD_MODEL_PROVIDER";
pub const ENV_MODEL_API_KEY: &str = "CLAUSEGUARD_MODEL_API_KEY";
pub const ENV_MODEL: &str = "CLAUSEGUARD_MODEL";
pub const ENV_MODEL_API_BASE: &str = "CLAUSEGUARD_MODEL_API_BASE";
pub const ENV_BIND_ADDR: &str = "CLAUSEGUARD_BIND_ADDR";
pub const ENV_TOKEN_TTL_HOURS: &str = "CLAUSEGUARD_TOKEN_TTL_HOURS";
pub const ENV_MODEL_MAX_TOKENS: &str = "CLAUSEGUARD_MODEL_MAX_TOKENS";
pub const ENV_MODEL_TEMPERATURE: &str = "CLAUSEGUARD_MODEL_TEMPERATURE";
pub const ENV_MODEL_SYSTEM_PROMPT: &str = "CLAUSEGUARD_MODEL_SYSTEM_PROMPT";

pub const DEFAULT_MODEL_PROVIDER: &str = "gemini";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// One year.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

const MAX_MODEL_TEMPERATURE: f64 = 2.0;

const ALL_VARS: [&str; 11] = [
    ENV_DATABASE_URL,
    ENV_SESSION_KEY,
    ENV_MODEL_PROVIDER,
    ENV_MODEL_API_KEY,
    ENV_MODEL,
    ENV_MODEL_API_BASE,
    ENV_BIND_ADDR,
    ENV_TOKEN_TTL_HOURS,
    ENV_MODEL_MAX_TOKENS,
    ENV_MODEL_TEMPERATURE,
    ENV_MODEL_SYSTEM_PROMPT,
];

/// Unvalidated settings, as gathered by clap from flags and the environment.
/// Blank values are already `None`.
#[derive(Debug, Clone, Default)]
pub struct RawConfig {
    pub database_url: Option<String>,
    pub session_key: Option<String>,
    pub model_provider: Option<String>,
    pub model_api_key: Option<String>,
    pub model: Option<String>,
    pub model_api_base: Option<String>,
    pub bind_addr: Option<String>,
    pub token_ttl_hours: Option<String>,
    pub model_max_tokens: Option<String>,
    pub model_temperature: Option<String>,
    pub model_system_prompt: Option<String>,
}

impl RawConfig {
    fn is_set(&self, var: &str) -> bool {
        let value = match var {
            ENV_DATABASE_URL => &self.database_url,
            ENV_SESSION_KEY => &self.session_key,
            ENV_MODEL_PROVIDER => &self.model_provider,
            ENV_MODEL_API_KEY => &self.model_api_key,
            ENV_MODEL => &self.model,
            ENV_MODEL_API_BASE => &self.model_api_base,
            ENV_BIND_ADDR => &self.bind_addr,
            ENV_TOKEN_TTL_HOURS => &self.token_ttl_hours,
            ENV_MODEL_MAX_TOKENS => &self.model_max_tokens,
            ENV_MODEL_TEMPERATURE => &self.model_temperature,
            ENV_MODEL_SYSTEM_PROMPT => &self.model_system_prompt,
            _ => return false,
        };
        value.is_some()
    }

    /// Logs which settings are present. Values are never printed.
    pub fn log_summary(&self) {
        for var in ALL_VARS {
            let state = if self.is_set(var) { "SET" } else { "NOT SET" };
            info!("{}: {}", var, state);
        }
    }
}

/// Everything the server needs to start.
#[derive(Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub session_key: String,
    pub model_provider: String,
    pub model_api_key: String,
    pub model: String,
    pub model_api_base: Option<String>,
    pub bind_addr: SocketAddr,
    pub token_ttl_hours: i64,
    pub model_max_tokens: Option<u32>,
    pub model_temperature: Option<f64>,
    pub model_system_prompt: Option<String>,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("database_url", &"<hidden>")
            .field("session_key", &"<hidden>")
            .field("model_provider", &self.model_provider)
            .field("model_api_key", &"<hidden>")
            .field("model", &self.model)
            .field("model_api_base", &self.model_api_base)
            .field("bind_addr", &self.bind_addr)
            .field("token_ttl_hours", &self.token_ttl_hours)
            .field("model_max_tokens", &self.model_max_tokens)
            .field("model_temperature", &self.model_temperature)
            .field("model_system_prompt", &self.model_system_prompt.as_ref().map(|_| "<set>"))
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigStatus {
    Ready(ServerConfig),
    /// `missing` names unset required variables; `invalid` explains values that were
    /// set but unusable.
    Misconfigured {
        missing: Vec<&'static str>,
        invalid: Vec<String>,
    },
}

impl ServerConfig {
    pub fn validate(raw: RawConfig) -> ConfigStatus {
        let mut missing = Vec::new();
        let mut invalid = Vec::new();

        let database_url = required(raw.database_url, ENV_DATABASE_URL, &mut missing);
        let session_key = required(raw.session_key, ENV_SESSION_KEY, &mut missing);
        let model_api_key = required(raw.model_api_key, ENV_MODEL_API_KEY, &mut missing);

        if let Some(key) = &session_key {
            if let Err(e) = TokenCipher::from_base64_key(key) {
                invalid.push(format!("{}: {}", ENV_SESSION_KEY, e));
            }
        }

        let model_provider = raw
            .model_provider
            .unwrap_or_else(|| DEFAULT_MODEL_PROVIDER.to_string())
            .to_lowercase();
        let provider_default = Provider::default_model_for(&model_provider);
        if provider_default.is_none() {
            invalid.push(format!(
                "{}: unsupported provider '{}' (expected gemini, openai or anthropic)",
                ENV_MODEL_PROVIDER, model_provider
            ));
        }
        let model = raw.model.or_else(|| provider_default.map(str::to_string));

        let bind_addr = raw
            .bind_addr
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = match bind_addr.parse::<SocketAddr>() {
            Ok(addr) => Some(addr),
            Err(e) => {
                invalid.push(format!("{}: '{}' is not a socket address: {}", ENV_BIND_ADDR, bind_addr, e));
                None
            }
        };

        let token_ttl_hours = match raw.token_ttl_hours.as_deref() {
            None => Some(DEFAULT_TOKEN_TTL_HOURS),
            Some(v) => match parse_token_ttl_hours(v) {
                Ok(h) => Some(h),
                Err(e) => {
                    invalid.push(format!("{}: {}", ENV_TOKEN_TTL_HOURS, e));
                    None
                }
            },
        };

        let model_max_tokens = match raw.model_max_tokens.as_deref() {
            None => None,
            Some(v) => match v.trim().parse::<u32>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    invalid.push(format!("{}: '{}' is not a positive token count", ENV_MODEL_MAX_TOKENS, v));
                    None
                }
            },
        };

        let model_temperature = match raw.model_temperature.as_deref() {
            None => None,
            Some(v) => match v.trim().parse::<f64>() {
                Ok(t) if (0.0..=MAX_MODEL_TEMPERATURE).contains(&t) => Some(t),
                _ => {
                    invalid.push(format!(
                        "{}: '{}' is not a temperature between 0 and {}",
                        ENV_MODEL_TEMPERATURE, v, MAX_MODEL_TEMPERATURE
                    ));
                    None
                }
            },
        };

        match (database_url, session_key, model_api_key, model, bind_addr, token_ttl_hours) {
            (Some(database_url), Some(session_key), Some(model_api_key), Some(model), Some(bind_addr), Some(token_ttl_hours))
                if invalid.is_empty() =>
            {
                ConfigStatus::Ready(ServerConfig {
                    database_url,
                    session_key,
                    model_provider,
                    model_api_key,
                    model,
                    model_api_base: raw.model_api_base,
                    bind_addr,
                    token_ttl_hours,
                    model_max_tokens,
                    model_temperature,
                    model_system_prompt: raw.model_system_prompt,
                })
            }
            _ => ConfigStatus::Misconfigured { missing, invalid },
        }
    }

    /// Provider settings, including the optional model tuning options.
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::new(&self.model_provider, &self.model_api_key, &self.model)
            .with_api_base(self.model_api_base.clone())
            .with_option("max_tokens", self.model_max_tokens.map(|n| n.to_string()))
            .with_option("temperature", self.model_temperature.map(|t| t.to_string()))
            .with_option("system_prompt", self.model_system_prompt.clone())
    }
}

/// Token lifetime in whole hours, between 1 and [`MAX_TOKEN_TTL_HOURS`].
pub fn parse_token_ttl_hours(value: &str) -> Result<i64, String> {
    match value.trim().parse::<i64>() {
        Ok(h) if (1..=MAX_TOKEN_TTL_HOURS).contains(&h) => Ok(h),
        Ok(h) if h > MAX_TOKEN_TTL_HOURS => Err(format!(
            "{} hours exceeds the maximum of {}",
            h, MAX_TOKEN_TTL_HOURS
        )),
        _ => Err(format!("'{}' is not a positive number of hours", value)),
    }
}

fn required(value: Option<String>, var: &'static str, missing: &mut Vec<&'static str>) -> Option<String> {
    if value.is_none() {
        missing.push(var);
    }
    value
}
