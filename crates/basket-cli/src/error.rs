//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Extractor error
    #[error(transparent)]
    Extractor(#[from] basket_extractor::ExtractorError),

    /// Provider configuration error
    #[error("Provider configuration error: {0}")]
    Provider(#[from] basket_llm::ConfigError),

    /// Completion provider error
    #[error("Provider error: {0}")]
    Llm(#[from] basket_llm::LlmError),

    /// Batch processing error
    #[error("Batch error: {0}")]
    Batch(#[from] basket_extractor::BatchError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
