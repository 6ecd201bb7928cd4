use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;
use tracing::warn;

use super::env::EnvSource;
use crate::domain::job::PollConfig;
use crate::domain::llm::GenerationParams;
use crate::domain::ChatError;
use crate::infrastructure::llm::{
    DEFAULT_CHAT_MODEL, DEFAULT_COMPLETIONS_URL, DEFAULT_HTTP_TIMEOUT, DEFAULT_SYSTEM_PROMPT,
};

/// Environment variable names
pub mod vars {
    pub const RUNPOD_API_KEY: &str = "RUNPOD_API_KEY";
    pub const RUNPOD_ENDPOINT: &str = "RUNPOD_ENDPOINT";
    pub const OPENROUTER_API_KEY: &str = "OPENROUTER_API_KEY";
    pub const OPENROUTER_ENDPOINT: &str = "OPENROUTER_ENDPOINT";
    pub const OPENROUTER_MODEL: &str = "OPENROUTER_MODEL";
    pub const SYSTEM_PROMPT: &str = "SYSTEM_PROMPT";
    pub const JOB_TEMPERATURE: &str = "JOB_TEMPERATURE";
    pub const JOB_MAX_TOKENS: &str = "JOB_MAX_TOKENS";
    pub const JOB_TOP_P: &str = "JOB_TOP_P";
    pub const JOB_STOP: &str = "JOB_STOP";
    pub const POLL_MAX_CYCLES: &str = "POLL_MAX_CYCLES";
    pub const POLL_INTERVAL_MS: &str = "POLL_INTERVAL_MS";
    pub const HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
}

/// Endpoint and key of one provider, as found in the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub endpoint_url: Option<String>,
    pub api_key: Option<String>,
    endpoint_var: &'static str,
    api_key_var: &'static str,
}

/// A provider whose required settings are all present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedProvider {
    pub endpoint: Url,
    pub api_key: String,
}

impl ProviderConfig {
    fn from_env(env: &dyn EnvSource, endpoint_var: &'static str, api_key_var: &'static str) -> Self {
        Self {
            endpoint_url: env.value(endpoint_var),
            api_key: env.value(api_key_var),
            endpoint_var,
            api_key_var,
        }
    }

    pub fn with_default_endpoint(mut self, endpoint: &str) -> Self {
        if self.endpoint_url.is_none() {
            self.endpoint_url = Some(endpoint.to_string());
        }
        self
    }

    /// Check that both the key and a parseable endpoint are present
    pub fn validate(&self) -> Result<ValidatedProvider, ChatError> {
        let missing: Vec<&str> = [
            (self.api_key_var, self.api_key.is_none()),
            (self.endpoint_var, self.endpoint_url.is_none()),
        ]
        .into_iter()
        .filter_map(|(var, absent)| absent.then_some(var))
        .collect();

        let (Some(endpoint), Some(api_key)) = (&self.endpoint_url, &self.api_key) else {
            return Err(ChatError::missing_configuration(format!(
                "{} not set",
                missing.join(", ")
            )));
        };

        let endpoint = Url::parse(endpoint).map_err(|e| {
            ChatError::missing_configuration(format!(
                "{} is not a valid URL ({})",
                self.endpoint_var, e
            ))
        })?;

        Ok(ValidatedProvider {
            endpoint,
            api_key: api_key.clone(),
        })
    }
}

/// Provider settings, read once at startup and shared read-only afterwards
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    /// Synchronous chat-completion provider
    pub chat: ProviderConfig,
    pub chat_model: String,
    pub system_prompt: String,
    /// Asynchronous job provider
    pub jobs: ProviderConfig,
    pub request_defaults: GenerationParams,
    pub poll: PollConfig,
    pub http_timeout: Duration,
}

impl GatewayConfig {
    /// Read all provider settings. Missing values never fail here; they are
    /// reported when a request needs them.
    pub fn from_env(env: &dyn EnvSource) -> Self {
        let defaults = GenerationParams::default();
        let poll_defaults = PollConfig::default();

        let request_defaults = GenerationParams {
            temperature: parse_or(env, vars::JOB_TEMPERATURE, defaults.temperature),
            max_tokens: parse_or(env, vars::JOB_MAX_TOKENS, defaults.max_tokens),
            top_p: parse_or(env, vars::JOB_TOP_P, defaults.top_p),
            stop: env
                .value(vars::JOB_STOP)
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or(defaults.stop),
        };

        let poll = PollConfig {
            max_cycles: parse_or(env, vars::POLL_MAX_CYCLES, poll_defaults.max_cycles).max(1),
            interval: Duration::from_millis(parse_or(
                env,
                vars::POLL_INTERVAL_MS,
                poll_defaults.interval.as_millis() as u64,
            )),
        };

        Self {
            chat: ProviderConfig::from_env(env, vars::OPENROUTER_ENDPOINT, vars::OPENROUTER_API_KEY)
                .with_default_endpoint(DEFAULT_COMPLETIONS_URL),
            chat_model: env
                .value(vars::OPENROUTER_MODEL)
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            system_prompt: env
                .value(vars::SYSTEM_PROMPT)
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            jobs: ProviderConfig::from_env(env, vars::RUNPOD_ENDPOINT, vars::RUNPOD_API_KEY),
            request_defaults,
            poll,
            http_timeout: Duration::from_secs(parse_or(
                env,
                vars::HTTP_TIMEOUT_SECS,
                DEFAULT_HTTP_TIMEOUT.as_secs(),
            )),
        }
    }
}

fn parse_or<T>(env: &dyn EnvSource, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env.value(key) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!(variable = key, value = %raw, error = %e, default = %default, "Invalid value, using default");
            default
        }),
    }
}
