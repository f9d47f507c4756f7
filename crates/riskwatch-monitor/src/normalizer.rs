//! Incident normalization
//!
//! The one place where severity casing and missing categories are resolved.
//! Normalization never fails: anything unrecognized lands in the `Unknown`
//! bucket so dirty upstream data can still be displayed and counted.

use riskwatch_core::{Incident, NormalizedIncident, Severity, UNKNOWN_CATEGORY};

/// Map a raw incident into canonical display shape
pub fn normalize(incident: Incident) -> NormalizedIncident {
    let severity = incident
        .severity
        .as_deref()
        .map(Severity::from_label)
        .unwrap_or(Severity::Unknown);

    let detected_category = match incident.detected_category {
        Some(category) if !category.is_empty() => category,
        _ => UNKNOWN_CATEGORY.to_string(),
    };

    NormalizedIncident {
        timestamp: incident.timestamp,
        title: incident.title,
        url: incident.url,
        content: incident.content,
        severity,
        detected_category,
        reason: incident.reason,
        original_query: incident.original_query,
    }
}

/// Normalize a whole batch, preserving order
pub fn normalize_all(incidents: impl IntoIterator<Item = Incident>) -> Vec<NormalizedIncident> {
    incidents.into_iter().map(normalize).collect()
}
