//! Severity-ranked monitor feed

use crate::normalizer::normalize_all;
use riskwatch_core::{Incident, NormalizedIncident, Severity};
use std::cmp::Reverse;

/// Ordered view for display: `Unknown` incidents are dropped, the rest are
/// sorted by severity rank, highest first.
///
/// The sort is stable, so incidents of equal severity keep their input order.
pub fn view(incidents: &[NormalizedIncident]) -> Vec<&NormalizedIncident> {
    let mut ranked: Vec<&NormalizedIncident> = incidents
        .iter()
        .filter(|incident| incident.severity != Severity::Unknown)
        .collect();
    ranked.sort_by_key(|incident| Reverse(incident.severity.rank()));
    ranked
}

/// Snapshot of normalized incidents backing the live monitor
#[derive(Debug, Clone, Default)]
pub struct MonitorFeed {
    incidents: Vec<NormalizedIncident>,
}

impl MonitorFeed {
    pub fn new(incidents: Vec<NormalizedIncident>) -> Self {
        Self { incidents }
    }

    /// Normalize a raw batch once on load
    pub fn from_raw(incidents: impl IntoIterator<Item = Incident>) -> Self {
        Self::new(normalize_all(incidents))
    }

    /// Every incident in the snapshot, including `Unknown` ones
    pub fn incidents(&self) -> &[NormalizedIncident] {
        &self.incidents
    }

    /// Display ordering of the snapshot
    pub fn view(&self) -> Vec<&NormalizedIncident> {
        view(&self.incidents)
    }

    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }
}
