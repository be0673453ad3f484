//! Configuration for the Extractor

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// What to do with a priority outside HIGH / MEDIUM / LOW
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityPolicy {
    /// Keep the model's value as-is
    #[default]
    PassThrough,
    /// Replace it with MEDIUM
    CoerceToMedium,
}

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Sampling temperature sent with every completion request
    pub model_temperature: f32,

    /// Maximum tokens the model may generate per request
    pub max_output_tokens: u32,

    /// Maximum time for a single completion call (seconds)
    pub request_timeout_secs: u64,

    /// Maximum input text length (characters); longer input is not sent
    pub max_text_length: usize,

    /// Handling of unrecognized priority values
    pub priority_policy: PriorityPolicy,
}

impl ExtractorConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=2.0).contains(&self.model_temperature) {
            return Err(format!(
                "model_temperature {} out of range [0.0, 2.0]",
                self.model_temperature
            ));
        }
        if self.max_output_tokens == 0 {
            return Err("max_output_tokens must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            model_temperature: 0.2,
            max_output_tokens: 2000,
            request_timeout_secs: 60,
            max_text_length: 10_000,
            priority_policy: PriorityPolicy::PassThrough,
        }
    }
}

impl ExtractorConfig {
    /// Strict preset: unknown priorities become MEDIUM, shorter timeout
    pub fn strict() -> Self {
        Self {
            request_timeout_secs: 30,
            priority_policy: PriorityPolicy::CoerceToMedium,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }

    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ExtractorError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ExtractorError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&contents).map_err(ExtractorError::Config)?;
        config.validate().map_err(ExtractorError::Config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_output_tokens, 2000);
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_strict_config_is_valid() {
        let config = ExtractorConfig::strict();
        assert!(config.validate().is_ok());
        assert_eq!(config.priority_policy, PriorityPolicy::CoerceToMedium);
    }

    #[test]
    fn test_invalid_temperature() {
        let mut config = ExtractorConfig::default();
        config.model_temperature = 2.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_zero_values() {
        let mut config = ExtractorConfig::default();
        config.max_output_tokens = 0;
        assert!(config.validate().is_err());

        let mut config = ExtractorConfig::default();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = ExtractorConfig::default();
        config.max_text_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ExtractorConfig::from_toml(
            r#"
            priority_policy = "coerce_to_medium"
            max_output_tokens = 150
            "#,
        )
        .unwrap();

        assert_eq!(config.priority_policy, PriorityPolicy::CoerceToMedium);
        assert_eq!(config.max_output_tokens, 150);
        assert_eq!(config.request_timeout_secs, 60);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::strict();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extractor.toml");
        std::fs::write(&path, "request_timeout_secs = 0\n").unwrap();

        let result = ExtractorConfig::from_file(&path);
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }
}
