//! Vendor client construction from configuration.

use super::cache::ResponseCache;
use super::client::HttpChatClient;
use super::retry::RetryPolicy;
use crate::config::Config;
use crate::error::ConfigError;
use std::time::Duration;

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok()
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Factory that creates the configured vendor client.
pub struct ChatClientFactory;

impl ChatClientFactory {
    /// Build the vendor client selected by `llm.provider`, wiring in the
    /// configured retry policy and (when enabled) the response cache.
    pub fn create(config: &Config) -> Result<HttpChatClient, ConfigError> {
        let retry = RetryPolicy {
            multiplier: config.retry.multiplier,
            min_delay: Duration::from_secs(config.retry.min_delay_secs),
            max_delay: Duration::from_secs(config.retry.max_delay_secs),
            max_attempts: config.retry.max_attempts,
        };

        let mut client = match config.llm.provider.as_str() {
            "openai" => {
                let cfg = config.llm.openai.clone().unwrap_or_default();
                let api_key = resolve_env_var(&cfg.api_key).ok_or_else(|| {
                    ConfigError::ValidationError(
                        "OpenAI API key not set. Set OPENAI_API_KEY env var.".to_string(),
                    )
                })?;
                let organization = resolve_env_var(&cfg.organization);
                HttpChatClient::openai(&api_key, organization.as_deref())
            }
            "azure" => {
                let cfg = config.llm.azure.clone().unwrap_or_default();
                if cfg.endpoint.is_empty() {
                    return Err(ConfigError::ValidationError(
                        "Azure endpoint not set in llm.azure.endpoint".to_string(),
                    ));
                }
                let api_key = resolve_env_var(&cfg.api_key).ok_or_else(|| {
                    ConfigError::ValidationError(
                        "Azure API key not set. Set AZURE_OPENAI_API_KEY env var.".to_string(),
                    )
                })?;
                HttpChatClient::azure(&cfg.endpoint, &api_key)
            }
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Unknown LLM provider: {other}"
                )))
            }
        };

        client = client.with_retry(retry);
        if config.llm.cache {
            client = client.with_cache(ResponseCache::new(config.cache_dir()));
        }
        Ok(client)
    }

    /// The model name configured for the selected vendor.
    pub fn model(config: &Config) -> String {
        match config.llm.provider.as_str() {
            "azure" => config
                .llm
                .azure
                .as_ref()
                .map(|c| c.model.clone())
                .unwrap_or_else(|| "gpt-4o".to_string()),
            _ => config
                .llm
                .openai
                .as_ref()
                .map(|c| c.model.clone())
                .unwrap_or_else(|| "gpt-4o".to_string()),
        }
    }
}
