//! Incident records for the monitor feed and analytics

use crate::types::SeverityAssessment;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Category shown for incidents with no detected category
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Characters of sourced content kept on a feed item
const CONTENT_PREVIEW_CHARS: usize = 300;

/// Display severity of an incident, ordered by rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Unknown,
    Safe,
    Low,
    Medium,
    High,
}

impl Severity {
    /// Buckets in display order
    pub const ALL: [Severity; 5] = [
        Self::High,
        Self::Medium,
        Self::Low,
        Self::Safe,
        Self::Unknown,
    ];

    /// Sort rank: high(4) > medium(3) > low(2) > safe(1) > unknown(0)
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 4,
            Self::Medium => 3,
            Self::Low => 2,
            Self::Safe => 1,
            Self::Unknown => 0,
        }
    }

    /// Case-insensitive mapping; anything unrecognized, padded labels
    /// included, is `Unknown`
    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            "safe" => Self::Safe,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Safe => "Safe",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Incident as it arrives from the ingestion side.
///
/// Deserialization never fails on a bad field: non-string `severity` or
/// `detected_category` values decode as absent, other scalar fields are
/// stringified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    #[serde(default, deserialize_with = "lenient_text")]
    pub timestamp: String,

    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient_text")]
    pub url: String,

    #[serde(default, deserialize_with = "lenient_text")]
    pub content: String,

    #[serde(default, deserialize_with = "lenient_label", skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    #[serde(default, deserialize_with = "lenient_label", skip_serializing_if = "Option::is_none")]
    pub detected_category: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub reason: String,

    /// Search query the item was sourced from, when known
    #[serde(default, deserialize_with = "lenient_label", skip_serializing_if = "Option::is_none")]
    pub original_query: Option<String>,
}

impl Incident {
    /// Build a feed item from a sourced post and its severity assessment.
    ///
    /// Content is cut to a short preview. An empty assessment category falls
    /// back to the category the post was sourced for.
    pub fn from_assessment(
        source: SourcedPost,
        assessment: SeverityAssessment,
        timestamp: impl Into<String>,
    ) -> Self {
        let detected_category = if assessment.category.trim().is_empty() {
            source.category
        } else {
            Some(assessment.category)
        };

        Self {
            timestamp: timestamp.into(),
            title: source.title,
            url: source.url,
            content: preview(&source.content, CONTENT_PREVIEW_CHARS),
            severity: Some(assessment.severity),
            detected_category,
            reason: assessment.reason,
            original_query: source.query,
        }
    }
}

/// Raw post handed over by the ingestion side before assessment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourcedPost {
    pub title: String,
    pub url: String,
    pub content: String,
    /// Category the post was searched for
    pub category: Option<String>,
    pub query: Option<String>,
}

/// Incident in canonical display shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedIncident {
    pub timestamp: String,
    pub title: String,
    pub url: String,
    pub content: String,
    pub severity: Severity,
    pub detected_category: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_query: Option<String>,
}

impl From<NormalizedIncident> for Incident {
    fn from(incident: NormalizedIncident) -> Self {
        Self {
            timestamp: incident.timestamp,
            title: incident.title,
            url: incident.url,
            content: incident.content,
            severity: Some(incident.severity.as_str().to_string()),
            detected_category: Some(incident.detected_category),
            reason: incident.reason,
            original_query: incident.original_query,
        }
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn lenient_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}
