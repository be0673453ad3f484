//! Server configuration loaded from environment variables.
//!
//! Reads bind address, static asset directory, list store location and the
//! optional extractor config path.

use basket_extractor::ExtractorConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("Invalid value for {name}: {value}")]
    InvalidVar {
        /// Variable name
        name: &'static str,
        /// Value as found
        value: String,
    },

    /// Extractor config file could not be read, parsed or validated
    #[error(transparent)]
    Extractor(#[from] basket_extractor::ExtractorError),
}

/// Server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Bind host (e.g., "0.0.0.0")
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Directory holding the built front-end
    pub static_dir: PathBuf,

    /// JSONL file shopping lists are appended to
    pub list_store_path: PathBuf,

    /// Optional TOML file with extractor settings
    pub extractor_config: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: PathBuf::from("dist"),
            list_store_path: PathBuf::from("data/lists.jsonl"),
            extractor_config: None,
        }
    }
}

impl ServerConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup; unset or empty values keep
    /// their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get("HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidVar {
                name: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(dir) = get("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(path) = get("LIST_STORE_PATH") {
            config.list_store_path = PathBuf::from(path);
        }
        config.extractor_config = get("EXTRACTOR_CONFIG").map(PathBuf::from);

        Ok(config)
    }

    /// Get the full bind address (host:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load the extractor settings
    ///
    /// `override_path` (from `--config`) wins over `EXTRACTOR_CONFIG`; with
    /// neither, the defaults are used. Files are validated as they load.
    pub fn load_extractor_config(
        &self,
        override_path: Option<&Path>,
    ) -> Result<ExtractorConfig, ConfigError> {
        match override_path.or(self.extractor_config.as_deref()) {
            Some(path) => Ok(ExtractorConfig::from_file(path)?),
            None => Ok(ExtractorConfig::default()),
        }
    }
}
