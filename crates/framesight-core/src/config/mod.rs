//! Configuration management for Framesight.
//!
//! Configuration is loaded from a platform config directory with sensible
//! defaults. All config structs implement `Default`.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Framesight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// LLM vendor settings
    pub llm: LlmConfig,

    /// Frame-analysis settings
    pub analysis: AnalysisConfig,

    /// Retry/backoff settings
    pub retry: RetryConfig,

    /// Download settings
    pub download: DownloadConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.framesight.framesight/config.toml
    /// - Linux: ~/.config/framesight/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\framesight\config\config.toml
    ///
    /// Falls back to ~/.framesight/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "framesight", "framesight")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".framesight").join("config.toml")
            })
    }

    /// Get the resolved data directory path (with ~ expansion).
    pub fn data_dir(&self) -> PathBuf {
        let path_str = self.general.data_dir.to_string_lossy();
        let expanded = shellexpand::tilde(&path_str);
        PathBuf::from(expanded.into_owned())
    }

    /// Get the response cache directory under the data directory.
    pub fn cache_dir(&self) -> PathBuf {
        self.data_dir().join(crate::storage::LLM_CACHE_DIR)
    }

    /// Get the resolved download output directory (with ~ expansion).
    pub fn download_dir(&self) -> PathBuf {
        let path_str = self.download.output_dir.to_string_lossy();
        let expanded = shellexpand::tilde(&path_str);
        PathBuf::from(expanded.into_owned())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.llm.provider, "openai");
        assert!(config.llm.cache);
        assert_eq!(config.analysis.parallel, 8);
        assert_eq!(config.retry.min_delay_secs, 4);
        assert_eq!(config.retry.max_delay_secs, 10);
        assert!(config.retry.max_attempts.is_none());
    }

    #[test]
    fn test_config_toml_round_trip() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.analysis.parallel, config.analysis.parallel);
        assert_eq!(parsed.llm.provider, config.llm.provider);
    }

    #[test]
    fn test_load_from_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[analysis]\nparallel = 2\n\n[llm]\nprovider = \"azure\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.analysis.parallel, 2);
        assert_eq!(config.llm.provider, "azure");
        // Unspecified sections keep defaults
        assert_eq!(config.retry.min_delay_secs, 4);
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not toml [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_cache_dir_under_data_dir() {
        let config = Config::default();
        assert!(config.cache_dir().ends_with("llm_cache"));
    }
}
