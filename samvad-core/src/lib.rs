//! Core of the SAMVAD misinformation monitor: the human-review queue, the
//! keyword triage matcher for citizen queries, and the analytics interface
//! used by the admin dashboard.

pub mod analytics;
pub mod error;
pub mod queue;
pub mod review;
pub mod seed;
pub mod triage;

pub use analytics::{
    AnalyticsProvider, Engagement, FlaggedPost, MockAnalytics, RegionalThreat, ResponseActivity,
    TimeScale, TimeSeriesPoint,
};
pub use error::{CoreError, QueueError};
pub use queue::ReviewQueue;
pub use review::{
    FullReport, ProposedPublication, Resolution, ResolutionAction, ResolvedItem, ReviewItem,
    ReviewItemId, Severity,
};
pub use triage::{TriageMatch, TriageMatcher, TriageRecord, TriageRule, TriageTable};

use serde::{Deserialize, Serialize};

/// Aggregate counters shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Fact-check queries answered, including the historical seed.
    pub queries: u64,
    /// Approved decisions, including the historical seed.
    pub blocked: u64,
    /// Items currently awaiting review.
    pub pending: u64,
}
