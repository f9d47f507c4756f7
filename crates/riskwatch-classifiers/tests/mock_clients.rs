//! Mock classifier clients for testing
//!
//! Scripted and failing implementations of the ClassifierClient trait,
//! used to exercise the classification service end to end without a network.

use async_trait::async_trait;
use riskwatch_classifiers::{ClassifierClient, SafetyClassifier};
use riskwatch_core::{ClassifyError, Confidence, ParseError, TransportError};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// A client that answers every prompt with a fixed reply
pub struct ScriptedClient {
    reply: String,
    prompts: Mutex<Vec<String>>,
    call_count: AtomicU32,
}

impl ScriptedClient {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
            call_count: AtomicU32::new(0),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ClassifierClient for ScriptedClient {
    async fn classify(&self, prompt: &str) -> Result<String, TransportError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// A client that always fails - for testing error paths
pub struct FailingClient {
    error: TransportError,
}

impl FailingClient {
    pub fn new(error: TransportError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl ClassifierClient for FailingClient {
    async fn classify(&self, _prompt: &str) -> Result<String, TransportError> {
        Err(self.error.clone())
    }

    fn name(&self) -> &str {
        "failing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIOLENCE_REPLY: &str = "```json\n{\"is_sensitive\":true,\"category\":\"violence\",\"confidence\":\"high\",\"safety_score\":12,\"trigger_words\":[\"kill\"],\"explanation\":\"Threat of harm.\"}\n```";

    #[tokio::test]
    async fn test_classify_sensitive_text() {
        let service = SafetyClassifier::new(ScriptedClient::new(VIOLENCE_REPLY));

        let verdict = service
            .classify("I'm going to kill him")
            .await
            .unwrap()
            .expect("non-blank input is classified");

        assert!(verdict.record.is_sensitive);
        assert_eq!(verdict.record.category, "violence");
        assert_eq!(verdict.record.confidence, Confidence::High);
        assert_eq!(verdict.record.safety_score, Some(12));
        assert_eq!(verdict.record.trigger_words, vec!["kill".to_string()]);
        assert!(verdict.inconsistency.is_none());

        let prompt = service.client().last_prompt().unwrap();
        assert!(prompt.contains("I'm going to kill him"));

        let snapshot = service.metrics().snapshot();
        assert_eq!(snapshot.requests, 1);
        assert_eq!(snapshot.sensitive, 1);
    }

    #[tokio::test]
    async fn test_blank_input_is_not_sent() {
        let service = SafetyClassifier::new(ScriptedClient::new(VIOLENCE_REPLY));

        assert_eq!(service.classify("   \n ").await.unwrap(), None);
        assert_eq!(service.classify("").await.unwrap(), None);
        assert_eq!(service.client().call_count(), 0);
        assert_eq!(service.metrics().snapshot().skipped, 2);
    }

    #[tokio::test]
    async fn test_garbage_reply_is_a_parse_error() {
        let service = SafetyClassifier::new(ScriptedClient::new("not json at all"));

        let err = service.classify("some text").await.unwrap_err();
        assert!(err.is_parse());
        assert!(matches!(err, ClassifyError::Parse(ParseError::Malformed(_))));
        assert_eq!(service.metrics().snapshot().parse_failures, 1);
        assert_eq!(service.metrics().snapshot().verdicts(), 0);
    }

    #[tokio::test]
    async fn test_missing_flag_is_never_defaulted_to_safe() {
        let reply = r#"{"category": "safe", "confidence": "high", "explanation": "fine"}"#;
        let service = SafetyClassifier::new(ScriptedClient::new(reply));

        let err = service.classify("some text").await.unwrap_err();
        assert_eq!(err, ClassifyError::Parse(ParseError::MissingField("is_sensitive")));
    }

    #[tokio::test]
    async fn test_transport_failure_is_surfaced() {
        let service = SafetyClassifier::new(FailingClient::new(TransportError::QuotaExceeded(
            "Resource has been exhausted".to_string(),
        )));

        let err = service.classify("some text").await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(
            err.user_message(),
            "Failed to classify text: quota exceeded: Resource has been exhausted"
        );

        let snapshot = service.metrics().snapshot();
        assert_eq!(snapshot.requests, 1);
        assert_eq!(snapshot.transport_failures, 1);
        assert_eq!(snapshot.failure_rate(), 1.0);
    }

    #[tokio::test]
    async fn test_inconsistent_verdict_is_flagged() {
        let reply = r#"{"is_sensitive": false, "category": "abuse", "confidence": "low", "explanation": "Mentions abuse awareness."}"#;
        let service = SafetyClassifier::new(ScriptedClient::new(reply));

        let verdict = service.classify("abuse awareness month").await.unwrap().unwrap();
        assert!(!verdict.record.is_sensitive);
        assert!(verdict.inconsistency.is_some());
        assert_eq!(service.metrics().snapshot().inconsistencies, 1);
    }

    #[tokio::test]
    async fn test_assess_severity() {
        let reply = r#"{"severity": "medium", "reason": "Seeking support", "category": "self-harm"}"#;
        let service = SafetyClassifier::new(ScriptedClient::new(reply));

        let assessment = service
            .assess("I've been struggling lately and need someone to talk to")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(assessment.severity, "medium");
        assert_eq!(assessment.category, "self-harm");

        let prompt = service.client().last_prompt().unwrap();
        assert!(prompt.contains("severity"));
        assert!(prompt.contains("\"other\""));
    }

    #[tokio::test]
    async fn test_assess_failure_is_surfaced() {
        let service = SafetyClassifier::new(FailingClient::new(TransportError::Timeout));
        let err = service.assess("content").await.unwrap_err();
        assert_eq!(err, ClassifyError::Transport(TransportError::Timeout));
    }
}
