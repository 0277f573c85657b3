//! The human-review queue.
//!
//! Items live in exactly one of two collections. `pending` keeps insertion
//! order (reverted items rejoin at the back); `resolved` is newest-first.
//! The queue is a plain synchronous value: callers that share it across tasks
//! wrap it in a single lock so each move is observed atomically.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{CoreError, QueueError};
use crate::review::{Resolution, ResolutionAction, ResolvedItem, ReviewItem, ReviewItemId};

#[derive(Debug, Clone, Default)]
pub struct ReviewQueue {
    pending: Vec<ReviewItem>,
    resolved: Vec<ResolvedItem>,
    blocked: u64,
}

impl ReviewQueue {
    /// Create a queue whose pending collection is `items`, in order.
    ///
    /// Fails if two items share an id.
    pub fn new(items: Vec<ReviewItem>, blocked: u64) -> Result<Self, CoreError> {
        let mut seen = std::collections::HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(CoreError::DuplicateItem(item.id));
            }
        }
        Ok(Self {
            pending: items,
            resolved: Vec::new(),
            blocked,
        })
    }

    pub fn pending(&self) -> &[ReviewItem] {
        &self.pending
    }

    pub fn resolved(&self) -> &[ResolvedItem] {
        &self.resolved
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Number of approved decisions, including the seeded historical total.
    pub fn blocked(&self) -> u64 {
        self.blocked
    }

    /// Move a pending item to the front of the resolved collection.
    ///
    /// Nothing is mutated when `id` is not pending.
    pub fn resolve(
        &mut self,
        id: ReviewItemId,
        action: ResolutionAction,
        resolved_by: impl Into<String>,
        resolved_at: DateTime<Utc>,
    ) -> Result<&ResolvedItem, QueueError> {
        let index = self
            .pending
            .iter()
            .position(|item| item.id == id)
            .ok_or(QueueError::NotPending(id))?;

        let item = self.pending.remove(index);
        let resolved = ResolvedItem {
            item,
            resolution: Resolution {
                resolved_at,
                resolved_action: action,
                resolved_by: resolved_by.into(),
            },
        };

        if action.blocks() {
            self.blocked += 1;
        }
        debug!(id, %action, "review item resolved");

        self.resolved.insert(0, resolved);
        Ok(&self.resolved[0])
    }

    /// Move a resolved item back to the end of the pending collection.
    ///
    /// Undoes the decision entirely: reverting an approval also takes it back
    /// out of the `blocked` count.
    pub fn revert(&mut self, id: ReviewItemId) -> Result<&ReviewItem, QueueError> {
        let index = self
            .resolved
            .iter()
            .position(|item| item.id() == id)
            .ok_or(QueueError::NotResolved(id))?;

        let resolved = self.resolved.remove(index);
        if resolved.resolution.resolved_action.blocks() {
            self.blocked = self.blocked.saturating_sub(1);
        }
        debug!(id, "review item reverted");

        self.pending.push(resolved.into_pending());
        Ok(&self.pending[self.pending.len() - 1])
    }
}
