//! Aggregate statistics over an incident batch
//!
//! Stats are recomputed from scratch for every batch. Nothing is kept
//! between calls, and ties are broken by first-seen order, so the same input
//! always yields the same output.

use riskwatch_core::{NormalizedIncident, Severity};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// `top_category` value for an empty batch
pub const NO_DATA: &str = "N/A";

/// One bar of a distribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionEntry {
    pub name: String,
    pub value: u64,
}

/// Counts per severity bucket.
///
/// Every bucket is counted; serialization and iteration only expose the
/// non-zero ones, in `High, Medium, Low, Safe, Unknown` order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityDistribution {
    counts: [u64; 5],
}

impl SeverityDistribution {
    fn slot(severity: Severity) -> usize {
        usize::from(Severity::High.rank() - severity.rank())
    }

    pub fn record(&mut self, severity: Severity) {
        self.counts[Self::slot(severity)] += 1;
    }

    /// Count for a bucket, zero included
    pub fn get(&self, severity: Severity) -> u64 {
        self.counts[Self::slot(severity)]
    }

    /// Non-zero buckets in display order
    pub fn iter(&self) -> impl Iterator<Item = (Severity, u64)> + '_ {
        Severity::ALL
            .into_iter()
            .map(move |severity| (severity, self.get(severity)))
            .filter(|(_, count)| *count > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|count| *count == 0)
    }
}

impl Serialize for SeverityDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (severity, count) in self.iter() {
            map.serialize_entry(severity.as_str(), &count)?;
        }
        map.end()
    }
}

/// Summary statistics for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateStats {
    pub severity_distribution: SeverityDistribution,

    /// Descending by count, ties in first-seen order
    pub category_distribution: Vec<DistributionEntry>,

    pub total: usize,

    pub high_severity_count: u64,

    /// Most frequent category, or [`NO_DATA`]
    pub top_category: String,
}

impl AggregateStats {
    pub fn has_data(&self) -> bool {
        self.total > 0
    }
}

/// Compute stats over the full batch, `Unknown` incidents included
pub fn aggregate(incidents: &[NormalizedIncident]) -> AggregateStats {
    let mut severity_distribution = SeverityDistribution::default();
    let mut category_distribution: Vec<DistributionEntry> = Vec::new();
    let mut category_slots: HashMap<&str, usize> = HashMap::new();

    for incident in incidents {
        severity_distribution.record(incident.severity);

        let category = incident.detected_category.as_str();
        match category_slots.get(category) {
            Some(&slot) => category_distribution[slot].value += 1,
            None => {
                category_slots.insert(category, category_distribution.len());
                category_distribution.push(DistributionEntry {
                    name: category.to_string(),
                    value: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts
    category_distribution.sort_by(|a, b| b.value.cmp(&a.value));

    let top_category = category_distribution
        .first()
        .map(|entry| entry.name.clone())
        .unwrap_or_else(|| NO_DATA.to_string());

    AggregateStats {
        high_severity_count: severity_distribution.get(Severity::High),
        severity_distribution,
        category_distribution,
        total: incidents.len(),
        top_category,
    }
}
