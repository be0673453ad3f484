//! OpenAI Provider Implementation
//!
//! Chat completions against either the public OpenAI API or an Azure OpenAI
//! deployment. Both speak the same request and response bodies; they differ
//! in URL layout and in how the key is sent.
//!
//! # Features
//!
//! - Async HTTP communication over `reqwest`
//! - Bounded request timeout (60 seconds by default)
//! - Status codes mapped onto [`LlmError`] variants
//! - No retries: one `complete` call is one request
//!
//! # Examples
//!
//! ```no_run
//! use basket_llm::{Endpoint, OpenAiProvider};
//! use std::time::Duration;
//!
//! let endpoint = Endpoint::OpenAi {
//!     base_url: "https://api.openai.com/v1".to_string(),
//!     model: "gpt-4o-mini".to_string(),
//! };
//! let provider = OpenAiProvider::new(endpoint, "sk-...", Duration::from_secs(60)).unwrap();
//! ```

use crate::config::ProviderConfig;
use crate::LlmError;
use async_trait::async_trait;
use basket_domain::{CompletionProvider, CompletionRequest};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default timeout for completion requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Where chat completion requests are sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Public OpenAI API (or anything compatible with it)
    OpenAi {
        /// Base URL without trailing slash, e.g. `https://api.openai.com/v1`
        base_url: String,
        /// Model name
        model: String,
    },

    /// Azure OpenAI deployment
    Azure {
        /// Resource endpoint without trailing slash
        endpoint: String,
        /// Deployment name (plays the role of the model)
        deployment: String,
        /// `api-version` query parameter
        api_version: String,
    },
}

impl Endpoint {
    /// Full URL of the chat completions route
    pub fn completions_url(&self) -> String {
        match self {
            Endpoint::OpenAi { base_url, .. } => format!("{}/chat/completions", base_url),
            Endpoint::Azure {
                endpoint,
                deployment,
                api_version,
            } => format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                endpoint, deployment, api_version
            ),
        }
    }

    /// Model or deployment name
    pub fn model(&self) -> &str {
        match self {
            Endpoint::OpenAi { model, .. } => model,
            Endpoint::Azure { deployment, .. } => deployment,
        }
    }
}

/// Chat completions provider for OpenAI and Azure OpenAI
pub struct OpenAiProvider {
    endpoint: Endpoint,
    api_key: String,
    client: reqwest::Client,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Other`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: Endpoint,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            api_key: api_key.into(),
            client,
            timeout,
        })
    }

    /// Create a provider from loaded configuration
    pub fn from_config(config: ProviderConfig, timeout: Duration) -> Result<Self, LlmError> {
        Self::new(config.endpoint, config.api_key, timeout)
    }

    /// The configured endpoint
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn request_body<'a>(&'a self, request: &'a CompletionRequest) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: self.endpoint.model(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout(self.timeout)
        } else {
            LlmError::Communication(format!("Request failed: {}", e))
        }
    }

    /// Send one chat completion request and return the first choice's text
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The service is unreachable or the request times out
    /// - The key is rejected (401/403)
    /// - The model or deployment does not exist (404)
    /// - The service is rate limiting (429)
    /// - The response has no choices or no content
    pub async fn chat(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let url = self.endpoint.completions_url();
        let body = self.request_body(request);

        let builder = self.client.post(&url).json(&body);
        let builder = match &self.endpoint {
            Endpoint::OpenAi { .. } => builder.bearer_auth(&self.api_key),
            Endpoint::Azure { .. } => builder.header("api-key", &self.api_key),
        };

        let response = builder.send().await.map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = %status, model = self.endpoint.model(), "Completion request rejected");

            return Err(match status {
                reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                    LlmError::Authentication(error_text)
                }
                reqwest::StatusCode::NOT_FOUND => {
                    LlmError::ModelNotAvailable(self.endpoint.model().to_string())
                }
                reqwest::StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
                _ => LlmError::Api {
                    status: status.as_u16(),
                    body: error_text,
                },
            });
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout(self.timeout)
            } else {
                LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
            }
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("No choices in response".to_string()))?
            .message
            .content
            .ok_or_else(|| LlmError::InvalidResponse("Choice has no content".to_string()))?;

        debug!(
            model = self.endpoint.model(),
            response_len = content.len(),
            "Chat completion received"
        );

        Ok(content)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    type Error = LlmError;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        self.chat(request).await
    }

    fn model_name(&self) -> &str {
        self.endpoint.model()
    }
}
