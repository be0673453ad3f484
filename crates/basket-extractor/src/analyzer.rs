//! Core analyzer implementation

use crate::config::{ExtractorConfig, PriorityPolicy};
use crate::error::ExtractorError;
use crate::parser::parse_model_reply;
use crate::prompt::PromptBuilder;
use crate::types::{Analysis, ModelFields};
use crate::units::standardize_unit;
use basket_domain::{CompletionProvider, Priority, ShoppingItemRecord};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Turns one line of free-text shopping input into a [`ShoppingItemRecord`]
///
/// Every call makes at most one completion request. Whatever goes wrong
/// (transport, timeout, malformed reply) ends in the fallback record; the
/// analyzer itself never fails.
pub struct ShoppingItemAnalyzer<L>
where
    L: CompletionProvider,
{
    provider: Arc<L>,
    prompt: PromptBuilder,
    config: ExtractorConfig,
}

impl<L> ShoppingItemAnalyzer<L>
where
    L: CompletionProvider,
{
    /// Create a new analyzer
    pub fn new(provider: L, config: ExtractorConfig) -> Self {
        Self::with_shared_provider(Arc::new(provider), config)
    }

    /// Create an analyzer around a provider that is shared elsewhere
    pub fn with_shared_provider(provider: Arc<L>, config: ExtractorConfig) -> Self {
        Self {
            provider,
            prompt: PromptBuilder::from_config(&config),
            config,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Name of the model answering requests
    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Analyze one line of text
    pub async fn analyze(&self, text: &str) -> Analysis {
        let start = Instant::now();

        match self.extract(text).await {
            Ok(record) => {
                info!(
                    item = %record.item_name,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Extracted shopping item"
                );
                Analysis::Extracted(record)
            }
            Err(reason) => {
                warn!(error = %reason, text = %text, "Extraction failed, using fallback");
                Analysis::Fallback {
                    record: ShoppingItemRecord::fallback(text),
                    reason,
                }
            }
        }
    }

    /// Analyze one line of text and keep only the record
    pub async fn analyze_record(&self, text: &str) -> ShoppingItemRecord {
        self.analyze(text).await.into_record()
    }

    async fn extract(&self, text: &str) -> Result<ShoppingItemRecord, ExtractorError> {
        if text.trim().is_empty() {
            return Err(ExtractorError::EmptyInput);
        }

        let length = text.chars().count();
        if length > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(length, self.config.max_text_length));
        }

        let request = self.prompt.build(text);

        let raw = timeout(self.config.request_timeout(), self.provider.complete(&request))
            .await
            .map_err(|_| ExtractorError::Timeout)?
            .map_err(|e| ExtractorError::Llm(e.to_string()))?;

        debug!(response_len = raw.len(), "Completion response received");

        let fields = parse_model_reply(&raw)?;
        Ok(self.normalize(fields, text))
    }

    /// Canonical field set, standardized unit, policy-checked priority, provenance
    fn normalize(&self, fields: ModelFields, text: &str) -> ShoppingItemRecord {
        ShoppingItemRecord {
            quantity: fields.quantity,
            unit: standardize_unit(&fields.unit),
            item_name: fields.item_name,
            brand: fields.brand,
            priority: self.resolve_priority(&fields.priority),
            details: fields.details,
            description: text.to_string(),
        }
    }

    fn resolve_priority(&self, raw: &str) -> Priority {
        if raw.trim().is_empty() {
            return Priority::Medium;
        }

        match Priority::parse(raw) {
            Some(priority) => priority,
            None => match self.config.priority_policy {
                PriorityPolicy::PassThrough => Priority::Unrecognized(raw.to_string()),
                PriorityPolicy::CoerceToMedium => {
                    debug!(priority = raw, "Coercing unrecognized priority to MEDIUM");
                    Priority::Medium
                }
            },
        }
    }
}
