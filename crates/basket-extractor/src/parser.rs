//! Parse the model's reply into raw record fields

use crate::error::ExtractorError;
use crate::types::ModelFields;
use serde_json::{Map, Value};

/// Parse the model's reply
///
/// The reply must decode to a JSON object. Absent or `null` keys read as
/// empty strings; present values must be strings, except `quantity`, which
/// may also be a number.
pub(crate) fn parse_model_reply(response: &str) -> Result<ModelFields, ExtractorError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(json_str)?;

    let obj = json.as_object().ok_or_else(|| {
        ExtractorError::InvalidFormat(format!("Expected JSON object, got {}", type_name(&json)))
    })?;

    Ok(ModelFields {
        item_name: string_field(obj, "itemName")?,
        quantity: quantity_field(obj)?,
        unit: string_field(obj, "unit")?,
        brand: string_field(obj, "brand")?,
        priority: string_field(obj, "priority")?,
        details: string_field(obj, "details")?,
    })
}

/// Strip surrounding whitespace and a markdown code fence, if any
fn extract_json(response: &str) -> Result<&str, ExtractorError> {
    let trimmed = response.trim();

    if !trimmed.starts_with("```") {
        return Ok(trimmed);
    }

    // Drop the opening fence line (``` or ```json) and the closing fence
    let body = trimmed
        .split_once('\n')
        .map(|(_, rest)| rest)
        .ok_or_else(|| ExtractorError::InvalidFormat("Empty code block".to_string()))?;
    let body = body.trim_end();
    let body = body.strip_suffix("```").unwrap_or(body);

    Ok(body.trim())
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Result<String, ExtractorError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ExtractorError::InvalidFormat(format!(
            "'{}' must be a string, got {}",
            key,
            type_name(other)
        ))),
    }
}

fn quantity_field(obj: &Map<String, Value>) -> Result<String, ExtractorError> {
    match obj.get("quantity") {
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => string_field(obj, "quantity"),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
