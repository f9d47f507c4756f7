//! RiskWatch Classifiers
//!
//! Safety classification through an external language model.
//!
//! The pipeline is split so each stage can be tested on its own:
//! - [`prompt`] builds a deterministic request that embeds the input safely
//! - [`classifier::ClassifierClient`] is the transport seam; [`gemini`] is the
//!   bundled implementation
//! - [`parser`] validates the raw reply into a typed record
//! - [`service::SafetyClassifier`] runs one request per call and records metrics

pub mod classifier;
pub mod config;
pub mod gemini;
pub mod parser;
pub mod prompt;
pub mod service;

pub use classifier::ClassifierClient;
pub use config::{ClassifierSettings, API_KEY_ENV};
pub use gemini::GeminiClient;
pub use parser::{parse_assessment, parse_classification, strip_code_fence};
pub use prompt::{build_assessment_prompt, build_classification_prompt, is_classifiable};
pub use service::{SafetyClassifier, Verdict};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::ClassifierClient;
    pub use crate::config::ClassifierSettings;
    pub use crate::gemini::GeminiClient;
    pub use crate::service::{SafetyClassifier, Verdict};
}
