//! Provider configuration loaded from environment variables.
//!
//! Azure OpenAI is selected when `AZURE_OPENAI_ENDPOINT` is present; the plain
//! OpenAI API is used otherwise.

use crate::openai::Endpoint;
use thiserror::Error;

/// Default Azure OpenAI API version
pub const DEFAULT_AZURE_API_VERSION: &str = "2024-02-15-preview";

/// Default Azure OpenAI deployment
pub const DEFAULT_AZURE_DEPLOYMENT: &str = "gpt-4.1";

/// Default OpenAI base URL
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default OpenAI model
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Provider configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),
}

/// Everything needed to construct an [`OpenAiProvider`](crate::OpenAiProvider)
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    /// Where requests go and which model answers them
    pub endpoint: Endpoint,

    /// API key for the chosen endpoint
    pub api_key: String,
}

impl ProviderConfig {
    /// Load from the process environment
    ///
    /// Callers that want `.env` support load it first (the binaries use
    /// `dotenvy`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = get("AZURE_OPENAI_ENDPOINT") {
            let api_key =
                get("AZURE_OPENAI_API_KEY").ok_or(ConfigError::MissingVar("AZURE_OPENAI_API_KEY"))?;

            return Ok(Self {
                endpoint: Endpoint::Azure {
                    endpoint: endpoint.trim_end_matches('/').to_string(),
                    deployment: get("AZURE_OPENAI_DEPLOYMENT_NAME")
                        .unwrap_or_else(|| DEFAULT_AZURE_DEPLOYMENT.to_string()),
                    api_version: get("AZURE_OPENAI_API_VERSION")
                        .unwrap_or_else(|| DEFAULT_AZURE_API_VERSION.to_string()),
                },
                api_key,
            });
        }

        let api_key = get("OPENAI_API_KEY").ok_or(ConfigError::MissingVar("OPENAI_API_KEY"))?;

        Ok(Self {
            endpoint: Endpoint::OpenAi {
                base_url: get("OPENAI_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
                model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            },
            api_key,
        })
    }
}
