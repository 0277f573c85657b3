use thiserror::Error;

use crate::review::ReviewItemId;

/// Failures of the review queue's move operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("review item {0} is not pending")]
    NotPending(ReviewItemId),

    #[error("review item {0} is not resolved")]
    NotResolved(ReviewItemId),
}

/// Failures while parsing values or loading the static tables.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("triage rule {index} references unknown record `{record}`")]
    UnknownRecord { index: usize, record: String },

    #[error("triage rule {index} has an invalid keyword `{keyword}`")]
    InvalidKeyword { index: usize, keyword: String },

    #[error("triage rule {index} has no keywords")]
    EmptyRule { index: usize },

    #[error("triage table has no `default` record")]
    MissingDefault,

    #[error("duplicate review item id {0}")]
    DuplicateItem(ReviewItemId),

    #[error("invalid severity `{0}` (expected HIGH, MED or LOW)")]
    InvalidSeverity(String),

    #[error("invalid action `{0}` (expected approve or reject)")]
    InvalidAction(String),
}

impl CoreError {
    pub(crate) fn parse(what: &'static str, source: serde_json::Error) -> Self {
        CoreError::Parse { what, source }
    }
}
