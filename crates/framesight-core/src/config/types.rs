//! Sub-configuration structs with defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Root for durable application data (response cache, sampled frames)
    pub data_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("~/.framesight"),
        }
    }
}

/// LLM vendor selection and credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Vendor identifier ("openai" or "azure")
    pub provider: String,

    /// Whether completions are served from the durable response cache
    pub cache: bool,

    /// OpenAI settings
    pub openai: Option<OpenAiConfig>,

    /// Azure OpenAI settings
    pub azure: Option<AzureConfig>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            cache: true,
            openai: Some(OpenAiConfig::default()),
            azure: None,
        }
    }
}

/// OpenAI vendor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API key, or a `${ENV_VAR}` reference
    pub api_key: String,

    /// Optional organization header value
    pub organization: String,

    /// Model sent in every request
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: "${OPENAI_API_KEY}".to_string(),
            organization: String::new(),
            model: "gpt-4o".to_string(),
        }
    }
}

/// Azure OpenAI vendor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AzureConfig {
    /// Full deployment endpoint URL
    pub endpoint: String,

    /// API key, or a `${ENV_VAR}` reference
    pub api_key: String,

    /// Model sent in every request
    pub model: String,
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: "${AZURE_OPENAI_API_KEY}".to_string(),
            model: "gpt-4o".to_string(),
        }
    }
}

/// Frame-analysis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Maximum concurrent chat-completion calls
    pub parallel: usize,

    /// Sampling temperature
    pub temperature: f32,

    /// Image fidelity ("low" or "high")
    pub detail: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            parallel: 8,
            temperature: 0.0,
            detail: "low".to_string(),
        }
    }
}

/// Retry/backoff settings for transient transport failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Scales the exponential backoff term (seconds)
    pub multiplier: u64,

    /// Minimum wait between attempts in seconds
    pub min_delay_secs: u64,

    /// Maximum wait between attempts in seconds
    pub max_delay_secs: u64,

    /// Attempt cap; absent means retry until cancelled
    pub max_attempts: Option<u32>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            multiplier: 1,
            min_delay_secs: 4,
            max_delay_secs: 10,
            max_attempts: None,
        }
    }
}

/// Video download settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Host patterns a source URL must match
    pub allowed_hosts: Vec<String>,

    /// Where downloaded media lands
    pub output_dir: PathBuf,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            allowed_hosts: crate::download::DEFAULT_ALLOWED_HOSTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            output_dir: PathBuf::from("~/.framesight/videos"),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level ("error", "warn", "info", "debug", "trace")
    pub level: String,

    /// Output format ("pretty" or "json")
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
