//! RiskWatch Core
//!
//! Core types and error handling shared across RiskWatch components.
//!
//! This crate provides:
//! - The error taxonomy separating transport failures from bad replies
//! - The validated classification record and its category/confidence types
//! - Incident records and the severity ranking used by the monitor

pub mod error;
pub mod incident;
pub mod types;

pub use error::{ClassifyError, Error, ParseError, Result, TransportError};
pub use incident::{Incident, NormalizedIncident, Severity, SourcedPost, UNKNOWN_CATEGORY};
pub use types::{
    ClassificationRecord, Confidence, Inconsistency, RiskCategory, SeverityAssessment,
    SAFE_CATEGORY,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{ClassifyError, Error, ParseError, Result, TransportError};
    pub use crate::incident::{Incident, NormalizedIncident, Severity};
    pub use crate::types::{ClassificationRecord, Confidence, RiskCategory};
}
