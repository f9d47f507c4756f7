//! Classification service
//!
//! Runs one request per call: build the prompt, await exactly one reply or
//! failure from the client, then validate the reply. Failures are returned
//! as [`ClassifyError`] values and never replaced by a default verdict.

use crate::classifier::ClassifierClient;
use crate::parser::{parse_assessment, parse_classification};
use crate::prompt::{build_assessment_prompt, build_classification_prompt, is_classifiable};
use riskwatch_core::{ClassificationRecord, ClassifyError, Inconsistency, SeverityAssessment};
use riskwatch_telemetry::ClassificationMetrics;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Validated classification plus what the service observed about it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub record: ClassificationRecord,

    /// Disagreement between `is_sensitive` and `category`, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inconsistency: Option<Inconsistency>,

    /// Classifier round trip in microseconds
    pub latency_us: u64,
}

/// Safety classifier over an injected client
pub struct SafetyClassifier<C> {
    client: C,
    metrics: ClassificationMetrics,
}

impl<C: ClassifierClient> SafetyClassifier<C> {
    /// Create a service with its own metrics collector
    pub fn new(client: C) -> Self {
        Self::with_metrics(client, ClassificationMetrics::new())
    }

    /// Create a service that reports into a shared collector
    pub fn with_metrics(client: C, metrics: ClassificationMetrics) -> Self {
        Self { client, metrics }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn metrics(&self) -> &ClassificationMetrics {
        &self.metrics
    }

    /// Classify `text` for safety risk.
    ///
    /// Returns `Ok(None)` without contacting the classifier when `text` is
    /// blank.
    pub async fn classify(&self, text: &str) -> Result<Option<Verdict>, ClassifyError> {
        if !is_classifiable(text) {
            debug!("Skipping classification of blank input");
            self.metrics.record_skipped();
            return Ok(None);
        }

        let prompt = build_classification_prompt(text);
        let (raw, latency_us) = self.send(&prompt).await?;

        let record = parse_classification(&raw).map_err(|e| {
            warn!(error = %e, "Rejected classifier reply");
            self.metrics.record_parse_failure();
            e
        })?;

        let inconsistency = record.inconsistency();
        if let Some(ref issue) = inconsistency {
            warn!(category = %record.category, "Inconsistent classifier verdict: {}", issue);
            self.metrics.record_inconsistency();
        }
        self.metrics.record_verdict(record.is_sensitive);

        info!(
            is_sensitive = record.is_sensitive,
            category = %record.category,
            confidence = %record.confidence,
            latency_us,
            "Classification complete"
        );

        Ok(Some(Verdict {
            record,
            inconsistency,
            latency_us,
        }))
    }

    /// Assess the severity of sourced incident content.
    ///
    /// Returns `Ok(None)` for blank content. Callers that must record the
    /// incident anyway can fall back to [`SeverityAssessment::unavailable`].
    pub async fn assess(&self, content: &str) -> Result<Option<SeverityAssessment>, ClassifyError> {
        if !is_classifiable(content) {
            debug!("Skipping assessment of blank content");
            self.metrics.record_skipped();
            return Ok(None);
        }

        let prompt = build_assessment_prompt(content);
        let (raw, latency_us) = self.send(&prompt).await?;

        let assessment = parse_assessment(&raw).map_err(|e| {
            warn!(error = %e, "Rejected assessment reply");
            self.metrics.record_parse_failure();
            e
        })?;

        info!(
            severity = %assessment.severity,
            category = %assessment.category,
            latency_us,
            "Assessment complete"
        );

        Ok(Some(assessment))
    }

    async fn send(&self, prompt: &str) -> Result<(String, u64), ClassifyError> {
        self.metrics.record_request();
        let start = Instant::now();

        let result = self.client.classify(prompt).await;
        let latency_us = start.elapsed().as_micros() as u64;
        self.metrics.record_latency(latency_us);

        match result {
            Ok(raw) => {
                debug!(client = self.client.name(), reply_len = raw.len(), latency_us, "Classifier replied");
                Ok((raw, latency_us))
            }
            Err(e) => {
                warn!(client = self.client.name(), error = %e, "Classifier request failed");
                self.metrics.record_transport_failure();
                Err(e.into())
            }
        }
    }
}
