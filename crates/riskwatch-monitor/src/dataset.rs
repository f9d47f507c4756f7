//! Synthetic benchmark dataset view

use riskwatch_core::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One labelled benchmark text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkEntry {
    pub text: String,

    /// Risk category or `"safe"`
    pub label: String,

    #[serde(default)]
    pub is_sensitive: bool,

    #[serde(default)]
    pub source: String,

    /// For safe contrast examples, the category they resemble
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_category: Option<String>,
}

/// Which entries to show
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LabelFilter {
    #[default]
    All,
    Label(String),
}

impl LabelFilter {
    /// `None` or `"all"` selects everything
    pub fn from_option(label: Option<&str>) -> Self {
        match label {
            None => Self::All,
            Some(l) if l.eq_ignore_ascii_case("all") => Self::All,
            Some(l) => Self::Label(l.to_string()),
        }
    }

    fn matches(&self, entry: &BenchmarkEntry) -> bool {
        match self {
            Self::All => true,
            Self::Label(label) => entry.label == *label,
        }
    }
}

/// Loaded benchmark dataset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BenchmarkSet {
    entries: Vec<BenchmarkEntry>,
}

impl BenchmarkSet {
    pub fn new(entries: Vec<BenchmarkEntry>) -> Self {
        Self { entries }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn entries(&self) -> &[BenchmarkEntry] {
        &self.entries
    }

    /// Distinct labels in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !labels.contains(&entry.label.as_str()) {
                labels.push(&entry.label);
            }
        }
        labels
    }

    pub fn filter(&self, filter: &LabelFilter) -> Vec<&BenchmarkEntry> {
        self.entries.iter().filter(|e| filter.matches(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"text": "I can't stop thinking about hurting myself.", "label": "self-harm", "is_sensitive": true, "source": "synthetic_gemini"},
        {"text": "He hits me when he drinks.", "label": "abuse", "is_sensitive": true, "source": "synthetic_gemini"},
        {"text": "Killed it at the gym today!", "label": "safe", "related_category": "violence", "is_sensitive": false, "source": "synthetic_gemini_safe_contrast"},
        {"text": "I've been hiding the marks on my arms.", "label": "self-harm", "is_sensitive": true, "source": "synthetic_gemini"}
    ]"#;

    #[test]
    fn test_categories_first_seen() {
        let set = BenchmarkSet::from_json(SAMPLE).unwrap();
        assert_eq!(set.categories(), vec!["self-harm", "abuse", "safe"]);
    }

    #[test]
    fn test_filter() {
        let set = BenchmarkSet::from_json(SAMPLE).unwrap();
        assert_eq!(set.filter(&LabelFilter::All).len(), 4);

        let self_harm = set.filter(&LabelFilter::Label("self-harm".to_string()));
        assert_eq!(self_harm.len(), 2);
        assert!(self_harm.iter().all(|e| e.is_sensitive));

        let safe = set.filter(&LabelFilter::from_option(Some("safe")));
        assert_eq!(safe[0].related_category.as_deref(), Some("violence"));

        assert!(set.filter(&LabelFilter::from_option(Some("overdose"))).is_empty());
    }

    #[test]
    fn test_filter_from_option() {
        assert_eq!(LabelFilter::from_option(None), LabelFilter::All);
        assert_eq!(LabelFilter::from_option(Some("ALL")), LabelFilter::All);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            BenchmarkSet::from_json("{"),
            Err(riskwatch_core::Error::Serialization(_))
        ));
    }
}
