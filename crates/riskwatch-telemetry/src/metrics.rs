//! Classification metrics collection and reporting
//!
//! Counters are kept locally for snapshots and mirrored to the `metrics`
//! facade, so an embedding process can export them through any recorder.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub const CLASSIFICATIONS_TOTAL: &str = "riskwatch_classifications_total";
pub const CLASSIFICATION_LATENCY_US: &str = "riskwatch_classification_latency_us";

/// Register metric descriptions with the installed recorder
pub fn describe_metrics() {
    metrics::describe_counter!(
        CLASSIFICATIONS_TOTAL,
        "Classification attempts by outcome"
    );
    metrics::describe_histogram!(
        CLASSIFICATION_LATENCY_US,
        metrics::Unit::Microseconds,
        "Round-trip latency of classifier requests in microseconds"
    );
}

/// Metrics collector for classification outcomes
#[derive(Clone)]
pub struct ClassificationMetrics {
    inner: Arc<MetricsInner>,
}

#[derive(Default)]
struct MetricsInner {
    requests: AtomicU64,
    skipped: AtomicU64,
    sensitive: AtomicU64,
    not_sensitive: AtomicU64,
    transport_failures: AtomicU64,
    parse_failures: AtomicU64,
    inconsistencies: AtomicU64,
    total_latency_us: AtomicU64,
}

impl ClassificationMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner::default()),
        }
    }

    /// Record a request sent to the classifier
    pub fn record_request(&self) {
        self.inner.requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record blank input that was never sent
    pub fn record_skipped(&self) {
        self.inner.skipped.fetch_add(1, Ordering::Relaxed);
        metrics::counter!(CLASSIFICATIONS_TOTAL, "outcome" => "skipped").increment(1);
    }

    /// Record a validated verdict
    pub fn record_verdict(&self, is_sensitive: bool) {
        let (counter, outcome) = if is_sensitive {
            (&self.inner.sensitive, "sensitive")
        } else {
            (&self.inner.not_sensitive, "not_sensitive")
        };
        counter.fetch_add(1, Ordering::Relaxed);
        metrics::counter!(CLASSIFICATIONS_TOTAL, "outcome" => outcome).increment(1);
    }

    pub fn record_transport_failure(&self) {
        self.inner.transport_failures.fetch_add(1, Ordering::Relaxed);
        metrics::counter!(CLASSIFICATIONS_TOTAL, "outcome" => "transport_error").increment(1);
    }

    pub fn record_parse_failure(&self) {
        self.inner.parse_failures.fetch_add(1, Ordering::Relaxed);
        metrics::counter!(CLASSIFICATIONS_TOTAL, "outcome" => "parse_error").increment(1);
    }

    /// Record a verdict whose sensitivity flag and category disagree
    pub fn record_inconsistency(&self) {
        self.inner.inconsistencies.fetch_add(1, Ordering::Relaxed);
    }

    /// Record classifier round-trip latency
    pub fn record_latency(&self, latency_us: u64) {
        self.inner
            .total_latency_us
            .fetch_add(latency_us, Ordering::Relaxed);
        metrics::histogram!(CLASSIFICATION_LATENCY_US).record(latency_us as f64);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.inner.requests.load(Ordering::Relaxed),
            skipped: self.inner.skipped.load(Ordering::Relaxed),
            sensitive: self.inner.sensitive.load(Ordering::Relaxed),
            not_sensitive: self.inner.not_sensitive.load(Ordering::Relaxed),
            transport_failures: self.inner.transport_failures.load(Ordering::Relaxed),
            parse_failures: self.inner.parse_failures.load(Ordering::Relaxed),
            inconsistencies: self.inner.inconsistencies.load(Ordering::Relaxed),
            total_latency_us: self.inner.total_latency_us.load(Ordering::Relaxed),
        }
    }
}

impl Default for ClassificationMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub skipped: u64,
    pub sensitive: u64,
    pub not_sensitive: u64,
    pub transport_failures: u64,
    pub parse_failures: u64,
    pub inconsistencies: u64,
    pub total_latency_us: u64,
}

impl MetricsSnapshot {
    /// Requests that ended in a verdict
    pub fn verdicts(&self) -> u64 {
        self.sensitive + self.not_sensitive
    }

    /// Calculate average latency per request
    pub fn avg_latency_us(&self) -> u64 {
        if self.requests == 0 {
            0
        } else {
            self.total_latency_us / self.requests
        }
    }

    /// Share of verdicts flagged sensitive
    pub fn sensitive_rate(&self) -> f64 {
        let verdicts = self.verdicts();
        if verdicts == 0 {
            0.0
        } else {
            self.sensitive as f64 / verdicts as f64
        }
    }

    /// Share of requests that produced no verdict
    pub fn failure_rate(&self) -> f64 {
        if self.requests == 0 {
            0.0
        } else {
            (self.transport_failures + self.parse_failures) as f64 / self.requests as f64
        }
    }
}
