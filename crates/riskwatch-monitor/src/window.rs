//! Rolling window of collected incidents
//!
//! Stored newest first. New items are deduplicated by URL and the window is
//! capped, dropping the oldest entries.

use riskwatch_core::Incident;
use std::collections::HashSet;
use tracing::{debug, info};

/// Number of incidents kept by default
pub const DEFAULT_WINDOW_CAPACITY: usize = 100;

/// Outcome of a merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub added: usize,
    pub duplicates: usize,
    pub trimmed: usize,
}

/// Capped, newest-first incident collection
#[derive(Debug, Clone)]
pub struct FeedWindow {
    capacity: usize,
    items: Vec<Incident>,
}

impl FeedWindow {
    pub fn new(capacity: usize) -> Self {
        Self::with_items(Vec::new(), capacity)
    }

    /// Wrap an existing newest-first collection
    pub fn with_items(items: Vec<Incident>, capacity: usize) -> Self {
        Self { capacity, items }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn items(&self) -> &[Incident] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Incident> {
        self.items
    }

    /// Merge newly collected incidents, given in arrival order.
    ///
    /// The last arrival ends up first. An incident whose URL is already in
    /// the window, or appeared earlier in the same batch, is skipped; empty
    /// URLs never count as duplicates.
    pub fn merge(&mut self, incoming: impl IntoIterator<Item = Incident>) -> MergeReport {
        let mut seen: HashSet<String> = self
            .items
            .iter()
            .filter(|item| !item.url.is_empty())
            .map(|item| item.url.clone())
            .collect();

        let mut report = MergeReport::default();
        let mut fresh = Vec::new();

        for incident in incoming {
            if !incident.url.is_empty() && !seen.insert(incident.url.clone()) {
                debug!(url = %incident.url, "Skipping duplicate incident");
                report.duplicates += 1;
                continue;
            }
            fresh.push(incident);
        }

        report.added = fresh.len();
        fresh.reverse();
        fresh.append(&mut self.items);
        self.items = fresh;

        if self.items.len() > self.capacity {
            report.trimmed = self.items.len() - self.capacity;
            self.items.truncate(self.capacity);
        }

        info!(
            added = report.added,
            duplicates = report.duplicates,
            trimmed = report.trimmed,
            total = self.items.len(),
            "Merged incidents into feed window"
        );

        report
    }
}

impl Default for FeedWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}
