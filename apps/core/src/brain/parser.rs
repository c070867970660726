//! Extraction and validation of the model's JSON verdict.

use crate::error::ParseError;
use crate::models::{Category, ClassificationVerdict};
use serde_json::Value;

/// Strips markdown fences and keeps the span from the first `{` to the last `}`.
///
/// Returns the trimmed, fence-free text when no such span exists.
pub fn extract_json(raw: &str) -> String {
    let unfenced = raw.replace("```json", "").replace("```", "");
    let trimmed = unfenced.trim();

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if end > start => trimmed[start..=end].to_string(),
        _ => trimmed.to_string(),
    }
}

/// Parses raw model output into a validated verdict with a canonical category.
pub fn parse_verdict(raw: &str) -> Result<ClassificationVerdict, ParseError> {
    let json = extract_json(raw);
    let value: Value =
        serde_json::from_str(&json).map_err(|e| ParseError::MalformedJson(e.to_string()))?;

    let object = value
        .as_object()
        .ok_or_else(|| ParseError::InvalidShape("expected a JSON object".to_string()))?;

    for field in ["categoria", "confianca", "justificativa"] {
        if !object.contains_key(field) {
            return Err(ParseError::InvalidShape(format!("missing field '{}'", field)));
        }
    }

    let category = object["categoria"]
        .as_str()
        .and_then(Category::from_label)
        .ok_or_else(|| {
            ParseError::InvalidShape(format!("invalid categoria: {}", object["categoria"]))
        })?;

    let confidence = object["confianca"]
        .as_f64()
        .ok_or_else(|| ParseError::InvalidShape("confianca is not a number".to_string()))?;
    if !(0.0..=1.0).contains(&confidence) {
        return Err(ParseError::InvalidShape(format!(
            "confianca out of range: {}",
            confidence
        )));
    }

    let justification = object["justificativa"]
        .as_str()
        .map(str::trim)
        .filter(|j| !j.is_empty())
        .ok_or_else(|| ParseError::InvalidShape("justificativa is empty".to_string()))?;

    Ok(ClassificationVerdict {
        category,
        confidence,
        justification: justification.to_string(),
    })
}
