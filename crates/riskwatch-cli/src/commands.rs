//! Subcommand handlers
//!
//! Handlers write to the given sinks instead of stdout so they can be driven
//! from tests. A handler returns an error when any unit of work failed; the
//! failure has already been reported on `err` by then.

use crate::config::AppConfig;
use crate::render;
use anyhow::{bail, Context};
use riskwatch_classifiers::{ClassifierClient, SafetyClassifier};
use riskwatch_core::{Incident, SeverityAssessment, SourcedPost};
use riskwatch_monitor::{
    aggregate, load_incidents, save_incidents, BenchmarkSet, FeedWindow, LabelFilter, MonitorFeed,
};
use serde_json::json;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reason stored on a feed item whose assessment failed
const ASSESSMENT_FAILED: &str = "Analysis failed";

/// Timestamp format used on feed items
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Classify each text in order, one request at a time
pub async fn classify<C: ClassifierClient>(
    classifier: &SafetyClassifier<C>,
    texts: Vec<String>,
    as_json: bool,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> anyhow::Result<()> {
    let total = texts.len();
    let mut failures = 0usize;

    for text in texts {
        match classifier.classify(&text).await {
            Ok(Some(verdict)) if as_json => {
                writeln!(out, "{}", json!({ "text": text, "verdict": verdict }))?;
            }
            Ok(Some(verdict)) => {
                writeln!(out, "{}", render::verdict(&verdict))?;
            }
            Ok(None) => {
                debug!("Blank input, nothing to classify");
            }
            Err(e) => {
                failures += 1;
                if as_json {
                    writeln!(out, "{}", json!({ "text": text, "error": e.user_message() }))?;
                }
                writeln!(err, "{}", render::classify_error(&e))?;
            }
        }
    }

    let snapshot = classifier.metrics().snapshot();
    debug!(
        requests = snapshot.requests,
        sensitive = snapshot.sensitive,
        failures = snapshot.transport_failures + snapshot.parse_failures,
        avg_latency_us = snapshot.avg_latency_us(),
        "Classification run finished"
    );

    if failures > 0 {
        bail!("{} of {} classifications failed", failures, total);
    }
    Ok(())
}

/// Post to assess and where to record it
#[derive(Debug, Clone)]
pub struct AssessRequest {
    pub post: SourcedPost,
    pub append: Option<PathBuf>,
    pub as_json: bool,
}

/// Assess one post, optionally merging it into a feed file.
///
/// A failed assessment is still recorded in the feed as an `Unknown` item,
/// but the command reports the failure.
pub async fn assess<C: ClassifierClient>(
    classifier: &SafetyClassifier<C>,
    request: AssessRequest,
    config: &AppConfig,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> anyhow::Result<()> {
    let (assessment, failure) = match classifier.assess(&request.post.content).await {
        Ok(Some(assessment)) => (assessment, None),
        Ok(None) => {
            writeln!(out, "Nothing to assess.")?;
            return Ok(());
        }
        Err(e) => {
            writeln!(err, "{}", render::classify_error(&e))?;
            (SeverityAssessment::unavailable(ASSESSMENT_FAILED), Some(e))
        }
    };

    if failure.is_none() {
        if request.as_json {
            writeln!(out, "{}", serde_json::to_string(&assessment)?)?;
        } else {
            write!(out, "{}", render::assessment(&assessment))?;
        }
    }

    if let Some(path) = &request.append {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        let incident = Incident::from_assessment(request.post, assessment, timestamp);
        append_incident(path, incident, config.monitor.window_capacity, out)?;
    }

    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn append_incident(
    path: &Path,
    incident: Incident,
    capacity: usize,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let existing = load_or_empty(path)?;
    let mut window = FeedWindow::with_items(existing, capacity);
    let report = window.merge([incident]);
    save_incidents(path, window.items())
        .with_context(|| format!("failed to write {}", path.display()))?;
    writeln!(out, "{}", render::merge_report(&report, window.items().len()))?;
    Ok(())
}

pub fn monitor(data: &Path, limit: Option<usize>, out: &mut dyn Write) -> anyhow::Result<()> {
    let feed = load_feed(data)?;
    write!(out, "{}", render::feed(&feed.view(), limit))?;
    Ok(())
}

pub fn analytics(data: &Path, as_json: bool, out: &mut dyn Write) -> anyhow::Result<()> {
    let feed = load_feed(data)?;
    let stats = aggregate(feed.incidents());

    if as_json {
        writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
    } else {
        write!(out, "{}", render::analytics(&stats))?;
    }
    Ok(())
}

pub fn dataset(data: &Path, label: Option<&str>, out: &mut dyn Write) -> anyhow::Result<()> {
    let set = BenchmarkSet::from_file(data)
        .with_context(|| format!("failed to load dataset {}", data.display()))?;
    let entries = set.filter(&LabelFilter::from_option(label));
    write!(out, "{}", render::dataset(&entries, &set.categories()))?;
    Ok(())
}

/// Files involved in a merge
#[derive(Debug, Clone)]
pub struct MergeRequest {
    pub existing: PathBuf,
    pub incoming: PathBuf,
    pub output: Option<PathBuf>,
    pub capacity: usize,
}

pub fn merge(request: &MergeRequest, out: &mut dyn Write) -> anyhow::Result<()> {
    let existing = load_or_empty(&request.existing)?;
    let incoming = load_incidents(&request.incoming)
        .with_context(|| format!("failed to load {}", request.incoming.display()))?;

    let mut window = FeedWindow::with_items(existing, request.capacity);
    let report = window.merge(incoming);

    let output = request.output.as_ref().unwrap_or(&request.existing);
    save_incidents(output, window.items())
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(path = %output.display(), "Wrote merged feed");

    writeln!(out, "{}", render::merge_report(&report, window.items().len()))?;
    Ok(())
}

fn load_feed(data: &Path) -> anyhow::Result<MonitorFeed> {
    let incidents = load_incidents(data)
        .with_context(|| format!("failed to load incidents from {}", data.display()))?;
    Ok(MonitorFeed::from_raw(incidents))
}

fn load_or_empty(path: &Path) -> anyhow::Result<Vec<Incident>> {
    if !path.exists() {
        info!(path = %path.display(), "Feed file does not exist yet, starting empty");
        return Ok(Vec::new());
    }
    load_incidents(path).with_context(|| format!("failed to load {}", path.display()))
}
