//! Basket Completion Provider Layer
//!
//! Implementations of the `CompletionProvider` trait from `basket-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI and Azure OpenAI chat completions
//!
//! # Examples
//!
//! ```
//! use basket_domain::{CompletionProvider, CompletionRequest};
//! use basket_llm::MockProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new(r#"{"itemName":"milk"}"#);
//! let request = CompletionRequest::new("system", "1l milk", 0.2, 100);
//! let result = provider.complete(&request).await.unwrap();
//! assert_eq!(result, r#"{"itemName":"milk"}"#);
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod openai;

use async_trait::async_trait;
use basket_domain::{CompletionProvider, CompletionRequest};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

pub use config::{ConfigError, ProviderConfig};
pub use openai::{Endpoint, OpenAiProvider};

/// Errors that can occur during completion calls
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or transport failure
    #[error("Communication error: {0}")]
    Communication(String),

    /// The request did not finish in time
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The service rejected the credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model or deployment not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Non-success HTTP status not covered above
    #[error("HTTP {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, as returned
        body: String,
    },

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error,
}

/// Mock completion provider for deterministic testing
///
/// Returns pre-configured responses keyed by the user message, without any
/// network calls.
///
/// # Examples
///
/// ```
/// use basket_llm::MockProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("1l milk", r#"{"itemName":"milk"}"#);
/// provider.add_error("bread");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_reply: MockReply,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<CompletionRequest>>>,
    delay: Option<Duration>,
    model_name: String,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all inputs
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(MockReply::Text(response.into()))
    }

    /// Create a MockProvider that fails every call, like an unreachable service
    pub fn failing() -> Self {
        Self::with_default(MockReply::Error)
    }

    fn with_default(default_reply: MockReply) -> Self {
        Self {
            default_reply,
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
            delay: None,
            model_name: "mock".to_string(),
        }
    }

    /// Add a specific response for a given user message
    pub fn add_response(&mut self, user: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(user.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for a specific user message
    pub fn add_error(&mut self, user: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(user.into(), MockReply::Error);
    }

    /// Sleep this long before answering each call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }

    /// The most recent request seen, if any
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    type Error = LlmError;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;
        *self.last_request.lock().unwrap() = Some(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self
            .responses
            .lock()
            .unwrap()
            .get(&request.user)
            .cloned()
            .unwrap_or_else(|| self.default_reply.clone());

        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Error => Err(LlmError::Communication("Mock connection refused".to_string())),
        }
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
