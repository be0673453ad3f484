//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use async_trait::async_trait;

/// A single chat-style completion call
///
/// Carries the fixed system instruction, the caller's text as the user turn,
/// and the sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System instruction
    pub system: String,

    /// User message
    pub user: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Create a request with the given messages and sampling parameters
    pub fn new(
        system: impl Into<String>,
        user: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature,
            max_tokens,
        }
    }
}

/// Trait for text-completion providers
///
/// Implemented by the infrastructure layer (basket-llm). One call to
/// [`complete`](CompletionProvider::complete) is one outbound request; the
/// provider does not retry or cache.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Error type for provider operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Run a completion and return the raw generated text
    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error>;

    /// Name of the model or deployment answering the requests
    fn model_name(&self) -> &str;
}
