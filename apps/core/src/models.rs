use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The two triage buckets an email can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Requires action or a reply (requests, problems, complaints).
    #[serde(rename = "PRODUTIVO")]
    Productive,
    /// Needs no immediate action (greetings, thanks, chain messages).
    #[serde(rename = "IMPRODUTIVO")]
    Unproductive,
}

impl Category {
    /// Canonical upper-case wire label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Productive => "PRODUTIVO",
            Category::Unproductive => "IMPRODUTIVO",
        }
    }

    /// Parses one of the accepted wire forms: upper-case or lower-case label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "PRODUTIVO" | "produtivo" => Some(Category::Productive),
            "IMPRODUTIVO" | "improdutivo" => Some(Category::Unproductive),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated classification: category, confidence in [0, 1], non-empty justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationVerdict {
    pub category: Category,
    pub confidence: f64,
    pub justification: String,
}

/// Outcome of one `classify` call, shaped for the route layer.
///
/// When `success` is false only `error` (and, where known, `processing_time_ms`) is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ClassificationResult {
    pub fn succeeded(verdict: ClassificationVerdict, suggested_response: String, elapsed: Duration) -> Self {
        Self {
            success: true,
            classification: Some(verdict.category),
            confidence: Some(verdict.confidence),
            justification: Some(verdict.justification),
            suggested_response: Some(suggested_response),
            processing_time_ms: Some(elapsed.as_millis() as u64),
            timestamp: Some(Utc::now()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>, elapsed: Option<Duration>) -> Self {
        Self {
            success: false,
            classification: None,
            confidence: None,
            justification: None,
            suggested_response: None,
            processing_time_ms: elapsed.map(|d| d.as_millis() as u64),
            timestamp: None,
            error: Some(error.into()),
        }
    }
}
