//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.provider != "openai" && self.llm.provider != "azure" {
            return Err(ConfigError::ValidationError(format!(
                "llm.provider must be \"openai\" or \"azure\", got \"{}\"",
                self.llm.provider
            )));
        }
        if self.analysis.parallel == 0 {
            return Err(ConfigError::ValidationError(
                "analysis.parallel must be > 0".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.analysis.temperature) {
            return Err(ConfigError::ValidationError(
                "analysis.temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if self.analysis.detail != "low" && self.analysis.detail != "high" {
            return Err(ConfigError::ValidationError(
                "analysis.detail must be \"low\" or \"high\"".into(),
            ));
        }
        if self.retry.min_delay_secs > self.retry.max_delay_secs {
            return Err(ConfigError::ValidationError(
                "retry.min_delay_secs must not exceed retry.max_delay_secs".into(),
            ));
        }
        if self.retry.max_attempts == Some(0) {
            return Err(ConfigError::ValidationError(
                "retry.max_attempts must be > 0 when set".into(),
            ));
        }
        if self.download.allowed_hosts.is_empty() {
            return Err(ConfigError::ValidationError(
                "download.allowed_hosts must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_provider() {
        let mut config = Config::default();
        config.llm.provider = "anthropic".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("llm.provider"));
    }

    #[test]
    fn test_validate_rejects_zero_parallel() {
        let mut config = Config::default();
        config.analysis.parallel = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("analysis.parallel"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_temperature() {
        let mut config = Config::default();
        config.analysis.temperature = 2.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("temperature"));
    }

    #[test]
    fn test_validate_rejects_inverted_retry_bounds() {
        let mut config = Config::default();
        config.retry.min_delay_secs = 20;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("retry.min_delay_secs"));
    }

    #[test]
    fn test_validate_rejects_zero_attempt_cap() {
        let mut config = Config::default();
        config.retry.max_attempts = Some(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_attempts"));
    }
}
