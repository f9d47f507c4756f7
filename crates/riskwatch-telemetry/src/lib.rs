//! RiskWatch Telemetry
//!
//! Counters and latency tracking for classification requests.

pub mod metrics;

pub use crate::metrics::{describe_metrics, ClassificationMetrics, MetricsSnapshot};
