//! Classification types shared by the prompt, parser and service layers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category label the classifier uses for text with no risk
pub const SAFE_CATEGORY: &str = "safe";

/// The closed set of risk categories the classifier is asked to choose from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskCategory {
    SelfHarm,
    Suicide,
    Violence,
    Abuse,
    Overdose,
}

impl RiskCategory {
    /// All categories, in the order they are presented to the classifier
    pub const ALL: [RiskCategory; 5] = [
        Self::SelfHarm,
        Self::Suicide,
        Self::Violence,
        Self::Abuse,
        Self::Overdose,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SelfHarm => "self-harm",
            Self::Suicide => "suicide",
            Self::Violence => "violence",
            Self::Abuse => "abuse",
            Self::Overdose => "overdose",
        }
    }

    /// Map a classifier label onto the closed set.
    ///
    /// Accepts `self harm` and `self_harm` spellings; anything outside the
    /// set (including `"safe"`) yields `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        let folded = label.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        Self::ALL.into_iter().find(|c| c.as_str() == folded)
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier's self-reported confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Case-insensitive parse of `low|medium|high`
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated verdict decoded from a classifier reply.
///
/// `safety_score` and `trigger_words` only exist in the newer reply schema;
/// older replies decode with `None` and an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub is_sensitive: bool,

    /// One of the [`RiskCategory`] labels or `"safe"`, as returned
    pub category: String,

    pub confidence: Confidence,

    /// 0 (most dangerous) to 100 (safest)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_score: Option<u8>,

    /// Order preserved as returned
    #[serde(default)]
    pub trigger_words: Vec<String>,

    #[serde(default)]
    pub explanation: String,
}

impl ClassificationRecord {
    /// Typed view of `category`, `None` for `"safe"` or unrecognized labels
    pub fn risk_category(&self) -> Option<RiskCategory> {
        RiskCategory::from_label(&self.category)
    }

    pub fn has_safe_category(&self) -> bool {
        self.category.trim().eq_ignore_ascii_case(SAFE_CATEGORY)
    }

    /// Disagreement between `is_sensitive` and `category`.
    ///
    /// Neither field is treated as authoritative; callers decide what to do.
    pub fn inconsistency(&self) -> Option<Inconsistency> {
        match (self.is_sensitive, self.has_safe_category()) {
            (true, true) => Some(Inconsistency::SensitiveWithSafeCategory),
            (false, false) => Some(Inconsistency::NotSensitiveWithRiskCategory {
                category: self.category.clone(),
            }),
            _ => None,
        }
    }
}

/// `is_sensitive` and `category` contradict each other
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Inconsistency {
    SensitiveWithSafeCategory,
    NotSensitiveWithRiskCategory { category: String },
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SensitiveWithSafeCategory => {
                f.write_str("flagged as sensitive but categorized as \"safe\"")
            }
            Self::NotSensitiveWithRiskCategory { category } => {
                write!(f, "flagged as not sensitive but categorized as \"{}\"", category)
            }
        }
    }
}

/// Severity verdict for a sourced incident
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityAssessment {
    /// `low|medium|high` as returned; normalized later by the monitor
    pub severity: String,

    #[serde(default)]
    pub reason: String,

    /// One of the risk categories or `"other"`
    #[serde(default)]
    pub category: String,
}

impl SeverityAssessment {
    /// Placeholder recorded when assessment failed.
    ///
    /// Normalizes to the `Unknown` bucket, so it never shows in the feed.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            severity: "unknown".to_string(),
            reason: reason.into(),
            category: "unknown".to_string(),
        }
    }
}
