//! LLM prompt construction for shopping item extraction

use crate::config::ExtractorConfig;
use basket_domain::CompletionRequest;

/// Builds completion requests for the extraction call
///
/// The system instruction is fixed; only the user turn varies per call.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    temperature: f32,
    max_tokens: u32,
}

impl PromptBuilder {
    /// Create a new prompt builder with explicit sampling parameters
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }

    /// Take sampling parameters from the extractor configuration
    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::new(config.model_temperature, config.max_output_tokens)
    }

    /// The fixed system instruction
    pub fn system_prompt(&self) -> &'static str {
        SYSTEM_PROMPT
    }

    /// Build the request for one line of shopping text
    pub fn build(&self, text: &str) -> CompletionRequest {
        CompletionRequest::new(SYSTEM_PROMPT, text, self.temperature, self.max_tokens)
    }
}

const SYSTEM_PROMPT: &str = r#"You are a shopping item analyzer.

Extract structured information from the user's text in strict JSON with the following fields:
{
  "itemName": "product name",
  "quantity": "numeric value or empty string",
  "unit": "unit of measurement or empty string",
  "brand": "brand name or empty string",
  "priority": "HIGH/MEDIUM/LOW",
  "details": "extra details or empty string"
}

Rules:
- Return exactly one JSON object with these six keys
- Use an empty string for anything the text does not mention
- Priority is HIGH, MEDIUM or LOW; use MEDIUM when the text gives no hint
- Only return valid JSON, no markdown code blocks, no explanations"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_all_fields() {
        let prompt = PromptBuilder::new(0.2, 2000).system_prompt();
        for field in ["itemName", "quantity", "unit", "brand", "priority", "details"] {
            assert!(prompt.contains(field), "missing {}", field);
        }
        assert!(prompt.contains("Only return valid JSON"));
    }

    #[test]
    fn test_user_turn_is_input_verbatim() {
        let builder = PromptBuilder::new(0.2, 2000);
        let request = builder.build("  1l milk of amul brand ");

        assert_eq!(request.user, "  1l milk of amul brand ");
        assert_eq!(request.system, SYSTEM_PROMPT);
    }

    #[test]
    fn test_sampling_parameters_from_config() {
        let mut config = ExtractorConfig::default();
        config.max_output_tokens = 150;

        let request = PromptBuilder::from_config(&config).build("eggs");
        assert_eq!(request.max_tokens, 150);
        assert!((request.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_system_prompt_does_not_depend_on_input() {
        let builder = PromptBuilder::new(0.2, 2000);
        assert_eq!(builder.build("a").system, builder.build("b").system);
    }
}
