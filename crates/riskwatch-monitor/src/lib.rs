//! RiskWatch Monitor
//!
//! Read-side processing of collected incidents: normalization into a
//! canonical shape, the severity-ranked live feed, aggregate statistics,
//! the capped rolling window and the labelled benchmark dataset.

pub mod analytics;
pub mod dataset;
pub mod feed;
pub mod load;
pub mod normalizer;
pub mod window;

pub use analytics::{aggregate, AggregateStats, DistributionEntry, SeverityDistribution, NO_DATA};
pub use dataset::{BenchmarkEntry, BenchmarkSet, LabelFilter};
pub use feed::{view, MonitorFeed};
pub use load::{load_incidents, parse_incidents, save_incidents};
pub use normalizer::{normalize, normalize_all};
pub use window::{FeedWindow, MergeReport, DEFAULT_WINDOW_CAPACITY};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::analytics::{aggregate, AggregateStats};
    pub use crate::feed::MonitorFeed;
    pub use crate::normalizer::normalize;
    pub use crate::window::FeedWindow;
}
