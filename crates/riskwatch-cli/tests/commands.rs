//! Subcommand handlers driven with an in-process classifier client

use async_trait::async_trait;
use riskwatch_classifiers::{ClassifierClient, SafetyClassifier};
use riskwatch_cli::commands::{self, AssessRequest, MergeRequest};
use riskwatch_cli::render::{EMPTY_FEED_NOTICE, HELPLINE_NOTICE};
use riskwatch_cli::AppConfig;
use riskwatch_core::{SourcedPost, TransportError};
use riskwatch_monitor::load_incidents;
use std::path::Path;

/// Answers every prompt with the same reply
struct FixedReply(String);

#[async_trait]
impl ClassifierClient for FixedReply {
    async fn classify(&self, _prompt: &str) -> Result<String, TransportError> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Fails every request with a timeout
struct TimingOut;

#[async_trait]
impl ClassifierClient for TimingOut {
    async fn classify(&self, _prompt: &str) -> Result<String, TransportError> {
        Err(TransportError::Timeout)
    }

    fn name(&self) -> &str {
        "timing-out"
    }
}

const VIOLENCE_REPLY: &str = "```json\n{\"is_sensitive\":true,\"category\":\"violence\",\"confidence\":\"high\",\"safety_score\":12,\"trigger_words\":[\"kill\"],\"explanation\":\"Threat of harm\"}\n```";

fn write(path: &Path, contents: &str) {
    std::fs::write(path, contents).unwrap();
}

fn text(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

#[tokio::test]
async fn classify_prints_verdict_with_helpline() {
    let classifier = SafetyClassifier::new(FixedReply(VIOLENCE_REPLY.to_string()));
    let (mut out, mut err) = (Vec::new(), Vec::new());

    commands::classify(
        &classifier,
        vec!["I want to kill him".to_string(), "   ".to_string()],
        false,
        &mut out,
        &mut err,
    )
    .await
    .unwrap();

    let out = text(out);
    assert!(out.starts_with(HELPLINE_NOTICE));
    assert!(out.contains("Category:    violence"));
    assert!(err.is_empty());

    let snapshot = classifier.metrics().snapshot();
    assert_eq!(snapshot.requests, 1);
    assert_eq!(snapshot.skipped, 1);
}

#[tokio::test]
async fn classify_json_lines() {
    let classifier = SafetyClassifier::new(FixedReply(VIOLENCE_REPLY.to_string()));
    let (mut out, mut err) = (Vec::new(), Vec::new());

    commands::classify(&classifier, vec!["x".to_string()], true, &mut out, &mut err)
        .await
        .unwrap();

    let line: serde_json::Value = serde_json::from_str(text(out).trim()).unwrap();
    assert_eq!(line["text"], "x");
    assert_eq!(line["verdict"]["record"]["safety_score"], 12);
    assert_eq!(line["verdict"]["record"]["trigger_words"][0], "kill");
}

#[tokio::test]
async fn classify_failure_is_reported_not_safe() {
    let classifier = SafetyClassifier::new(TimingOut);
    let (mut out, mut err) = (Vec::new(), Vec::new());

    let result = commands::classify(&classifier, vec!["hello".to_string()], false, &mut out, &mut err).await;

    assert!(result.is_err());
    assert!(out.is_empty());
    let err = text(err);
    assert!(err.starts_with("Error: Failed to classify text"));
    assert!(!err.contains("Safe"));
}

#[tokio::test]
async fn classify_unparseable_reply_fails() {
    let classifier = SafetyClassifier::new(FixedReply("not json at all".to_string()));
    let (mut out, mut err) = (Vec::new(), Vec::new());

    let result = commands::classify(&classifier, vec!["hello".to_string()], false, &mut out, &mut err).await;

    assert!(result.is_err());
    assert_eq!(classifier.metrics().snapshot().parse_failures, 1);
}

#[tokio::test]
async fn assess_appends_to_feed() {
    let dir = tempfile::tempdir().unwrap();
    let feed = dir.path().join("feed.json");
    write(
        &feed,
        r#"[{"title": "older", "url": "https://example.com/old", "severity": "Low"}]"#,
    );

    let classifier = SafetyClassifier::new(FixedReply(
        r#"{"severity": "high", "reason": "Explicit plan", "category": "suicide"}"#.to_string(),
    ));
    let request = AssessRequest {
        post: SourcedPost {
            title: "New post".to_string(),
            url: "https://example.com/new".to_string(),
            content: "I have made up my mind".to_string(),
            category: Some("suicide".to_string()),
            query: None,
        },
        append: Some(feed.clone()),
        as_json: false,
    };
    let (mut out, mut err) = (Vec::new(), Vec::new());

    commands::assess(&classifier, request, &AppConfig::default(), &mut out, &mut err)
        .await
        .unwrap();

    let out = text(out);
    assert!(out.contains("Severity: high"));
    assert!(out.contains("Added 1 new incidents"));

    let stored = load_incidents(&feed).unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].title, "New post");
    assert_eq!(stored[0].severity.as_deref(), Some("high"));
    assert_eq!(stored[0].detected_category.as_deref(), Some("suicide"));
    assert!(!stored[0].timestamp.is_empty());
}

#[tokio::test]
async fn failed_assessment_is_stored_as_unknown() {
    let dir = tempfile::tempdir().unwrap();
    let feed = dir.path().join("feed.json");

    let classifier = SafetyClassifier::new(TimingOut);
    let request = AssessRequest {
        post: SourcedPost {
            title: "Post".to_string(),
            content: "content".to_string(),
            ..Default::default()
        },
        append: Some(feed.clone()),
        as_json: false,
    };
    let (mut out, mut err) = (Vec::new(), Vec::new());

    let result = commands::assess(&classifier, request, &AppConfig::default(), &mut out, &mut err).await;
    assert!(result.is_err());
    assert!(text(err).starts_with("Error: "));

    let stored = load_incidents(&feed).unwrap();
    assert_eq!(stored[0].reason, "Analysis failed");

    let mut out = Vec::new();
    commands::monitor(&feed, None, &mut out).unwrap();
    assert_eq!(text(out).trim(), EMPTY_FEED_NOTICE);
}

#[test]
fn monitor_and_analytics() {
    let dir = tempfile::tempdir().unwrap();
    let feed = dir.path().join("feed.json");
    write(
        &feed,
        r#"[
            {"title": "a", "severity": "High", "detected_category": "violence"},
            {"title": "b", "severity": "low", "detected_category": "abuse"},
            {"title": "c", "severity": "HIGH"},
            {"title": "d", "severity": "unknown"}
        ]"#,
    );

    let mut out = Vec::new();
    commands::monitor(&feed, None, &mut out).unwrap();
    let out = text(out);
    let positions: Vec<usize> = ["  a\n", "  c\n", "  b\n"]
        .iter()
        .map(|title| out.find(title).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(!out.contains("  d\n"));

    let mut out = Vec::new();
    commands::analytics(&feed, true, &mut out).unwrap();
    let stats: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(stats["total"], 4);
    assert_eq!(stats["high_severity_count"], 2);
    assert_eq!(
        stats["severity_distribution"],
        serde_json::json!({"High": 2, "Low": 1, "Unknown": 1})
    );
}

#[test]
fn monitor_missing_file_is_an_error() {
    let mut out = Vec::new();
    assert!(commands::monitor(Path::new("/nonexistent/feed.json"), None, &mut out).is_err());
}

#[test]
fn dataset_filter() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("benchmark.json");
    write(
        &data,
        r#"[
            {"text": "one", "label": "overdose", "is_sensitive": true, "source": "synthetic_gemini"},
            {"text": "two", "label": "safe", "related_category": "overdose", "is_sensitive": false, "source": "synthetic_gemini_safe_contrast"}
        ]"#,
    );

    let mut out = Vec::new();
    commands::dataset(&data, Some("safe"), &mut out).unwrap();
    let out = text(out);
    assert!(out.contains("Labels: overdose, safe"));
    assert!(out.contains("Showing 1 entries"));
    assert!(out.contains("\"two\""));
    assert!(!out.contains("\"one\""));
}

#[test]
fn merge_into_new_feed() {
    let dir = tempfile::tempdir().unwrap();
    let existing = dir.path().join("feed.json");
    let incoming = dir.path().join("incoming.json");
    let output = dir.path().join("merged.json");
    write(
        &incoming,
        r#"[{"title": "x", "url": "u1"}, {"title": "y", "url": "u1"}, {"title": "z", "url": "u2"}]"#,
    );

    let request = MergeRequest {
        existing: existing.clone(),
        incoming,
        output: Some(output.clone()),
        capacity: 1,
    };
    let mut out = Vec::new();
    commands::merge(&request, &mut out).unwrap();

    assert!(text(out).contains("(1 duplicates skipped, 1 trimmed)"));
    assert!(!existing.exists());

    let merged = load_incidents(&output).unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].title, "z");
}
