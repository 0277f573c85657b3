//! Shared monitor state.
//!
//! The review queue sits behind a single `RwLock` so that every resolve or
//! revert (a search followed by two collection updates) is observed as one
//! step. Decisions are sent to the journal before the write guard drops, so
//! the journal order matches the order applied to the queue. The query counter
//! is independent of the queue and is a plain atomic.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

use crate::journal::{Decision, DecisionEntry, DecisionJournal};
use samvad_core::seed::{self, SEED_BLOCKED, SEED_QUERIES};
use samvad_core::{
    CoreError, QueueError, ResolutionAction, ResolvedItem, ReviewItem, ReviewItemId,
    ReviewQueue, Stats,
};

/// Thread-safe owner of the review queue and the dashboard counters.
pub struct MonitorStore {
    queue: RwLock<ReviewQueue>,
    queries: AtomicU64,
    journal: Option<DecisionJournal>,
}

impl MonitorStore {
    pub fn new(queue: ReviewQueue, queries: u64) -> Self {
        Self {
            queue: RwLock::new(queue),
            queries: AtomicU64::new(queries),
            journal: None,
        }
    }

    /// Record every successful resolve and revert to `journal`.
    pub fn with_journal(mut self, journal: DecisionJournal) -> Self {
        self.journal = Some(journal);
        self
    }

    /// A store holding the embedded seed queue and historical counters.
    pub fn from_seed() -> Result<Self, CoreError> {
        let queue = ReviewQueue::new(seed::review_items()?, SEED_BLOCKED)?;
        Ok(Self::new(queue, SEED_QUERIES))
    }

    pub async fn stats(&self) -> Stats {
        let queue = self.queue.read().await;
        self.stats_for(&queue)
    }

    pub async fn pending(&self) -> Vec<ReviewItem> {
        self.queue.read().await.pending().to_vec()
    }

    pub async fn resolved(&self) -> Vec<ResolvedItem> {
        self.queue.read().await.resolved().to_vec()
    }

    /// Resolve a pending item, returning it with the counters after the move.
    pub async fn resolve(
        &self,
        id: ReviewItemId,
        action: ResolutionAction,
        resolved_by: &str,
    ) -> Result<(ResolvedItem, Stats), QueueError> {
        let mut queue = self.queue.write().await;
        let resolved = queue.resolve(id, action, resolved_by, Utc::now())?.clone();
        let stats = self.stats_for(&queue);
        self.journal_decision(
            id,
            Decision::Resolved {
                action,
                actor: resolved_by.to_string(),
            },
        );

        info!(
            "Resolved review item {} as {} by {} ({} pending)",
            id, action, resolved_by, stats.pending
        );
        Ok((resolved, stats))
    }

    /// Return a resolved item to the pending queue.
    pub async fn revert(&self, id: ReviewItemId) -> Result<(ReviewItem, Stats), QueueError> {
        let mut queue = self.queue.write().await;
        let item = queue.revert(id)?.clone();
        let stats = self.stats_for(&queue);
        self.journal_decision(id, Decision::Reverted);

        info!(
            "Reverted review item {} to pending ({} pending)",
            id, stats.pending
        );
        Ok((item, stats))
    }

    /// Count one fact-check query, returning the new total.
    pub fn record_query(&self) -> u64 {
        self.queries.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn journal_decision(&self, id: ReviewItemId, decision: Decision) {
        if let Some(journal) = &self.journal {
            journal.record(DecisionEntry::new(id, decision));
        }
    }

    fn stats_for(&self, queue: &ReviewQueue) -> Stats {
        Stats {
            queries: self.queries.load(Ordering::Relaxed),
            blocked: queue.blocked(),
            pending: queue.pending_count() as u64,
        }
    }
}
