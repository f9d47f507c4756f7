//! Plain-text output for terminal display

use riskwatch_classifiers::Verdict;
use riskwatch_core::{ClassifyError, NormalizedIncident, SeverityAssessment};
use riskwatch_monitor::{AggregateStats, BenchmarkEntry, MergeReport};

/// Shown above sensitive verdicts
pub const HELPLINE_NOTICE: &str = "\
Help is available. If you or someone you know is struggling or in immediate danger, please reach out.
  USA (988 Lifeline): 988
  UK (Samaritans):    116 123
  Emergency:          911 (US) / 999 (UK)";

/// Shown when a feed has nothing to display
pub const EMPTY_FEED_NOTICE: &str = "No classified incidents collected yet.";

pub fn verdict(verdict: &Verdict) -> String {
    let record = &verdict.record;
    let mut out = String::new();

    if record.is_sensitive {
        out.push_str(HELPLINE_NOTICE);
        out.push_str("\n\n");
    }

    let label = if record.is_sensitive { "Sensitive" } else { "Safe" };
    out.push_str(&format!("Result:      {}\n", label));
    out.push_str(&format!("Category:    {}\n", record.category));
    out.push_str(&format!("Confidence:  {}\n", record.confidence));
    if let Some(score) = record.safety_score {
        out.push_str(&format!("Safety:      {}/100\n", score));
    }
    if !record.trigger_words.is_empty() {
        out.push_str(&format!("Triggers:    {}\n", record.trigger_words.join(", ")));
    }
    if !record.explanation.is_empty() {
        out.push_str(&format!("Explanation: {}\n", record.explanation));
    }
    if let Some(issue) = &verdict.inconsistency {
        out.push_str(&format!("Warning:     classifier reply is inconsistent ({})\n", issue));
    }

    out
}

pub fn classify_error(error: &ClassifyError) -> String {
    format!("Error: {}", error.user_message())
}

pub fn assessment(assessment: &SeverityAssessment) -> String {
    let mut out = format!("Severity: {}\n", assessment.severity);
    if !assessment.category.is_empty() {
        out.push_str(&format!("Category: {}\n", assessment.category));
    }
    if !assessment.reason.is_empty() {
        out.push_str(&format!("Reason:   {}\n", assessment.reason));
    }
    out
}

/// Ranked feed, optionally cut to `limit` items
pub fn feed(ranked: &[&NormalizedIncident], limit: Option<usize>) -> String {
    if ranked.is_empty() {
        return format!("{}\n", EMPTY_FEED_NOTICE);
    }

    let shown = limit.unwrap_or(ranked.len()).min(ranked.len());
    let mut out = String::new();

    for incident in &ranked[..shown] {
        out.push_str(&format!("[{}] {}\n", incident.severity, incident.timestamp));
        out.push_str(&format!("  {}\n", incident.title));
        if !incident.url.is_empty() {
            out.push_str(&format!("  {}\n", incident.url));
        }
        if !incident.content.is_empty() {
            out.push_str(&format!("  {}\n", incident.content));
        }
        out.push_str(&format!("  Detected: {}\n", incident.detected_category));
        if !incident.reason.is_empty() {
            out.push_str(&format!("  Analysis: {}\n", incident.reason));
        }
        out.push('\n');
    }

    if shown < ranked.len() {
        out.push_str(&format!("... {} more\n", ranked.len() - shown));
    }

    out
}

pub fn analytics(stats: &AggregateStats) -> String {
    if !stats.has_data() {
        return format!("{}\n", EMPTY_FEED_NOTICE);
    }

    let mut out = String::new();
    out.push_str(&format!("Total incidents: {}\n", stats.total));
    out.push_str(&format!("High severity:   {}\n", stats.high_severity_count));
    out.push_str(&format!("Top category:    {}\n", stats.top_category));

    out.push_str("\nSeverity distribution\n");
    for (severity, count) in stats.severity_distribution.iter() {
        out.push_str(&format!("  {:<8} {}\n", severity, count));
    }

    out.push_str("\nCategory breakdown\n");
    for entry in &stats.category_distribution {
        out.push_str(&format!("  {:<12} {}\n", entry.name, entry.value));
    }

    out
}

pub fn dataset(entries: &[&BenchmarkEntry], categories: &[&str]) -> String {
    let mut out = format!("Labels: {}\n", categories.join(", "));
    out.push_str(&format!("Showing {} entries\n\n", entries.len()));

    for entry in entries {
        let tag = if entry.is_sensitive { "sensitive" } else { "safe" };
        match &entry.related_category {
            Some(related) => out.push_str(&format!("[{} / {}, resembles {}]\n", entry.label, tag, related)),
            None => out.push_str(&format!("[{} / {}]\n", entry.label, tag)),
        }
        out.push_str(&format!("  \"{}\"\n", entry.text));
    }

    out
}

pub fn merge_report(report: &MergeReport, total: usize) -> String {
    format!(
        "Added {} new incidents ({} duplicates skipped, {} trimmed). Feed now holds {}.",
        report.added, report.duplicates, report.trimmed, total
    )
}
