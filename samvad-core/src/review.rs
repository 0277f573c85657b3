//! Review items flagged for a human decision.
//!
//! Pending and resolved items are distinct types so that the resolution
//! metadata can only exist on an item that has actually been resolved.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Unique identifier of a review item.
pub type ReviewItemId = u64;

/// Informational urgency tag. Not used for routing or ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    High,
    Med,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "HIGH",
            Severity::Med => "MED",
            Severity::Low => "LOW",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CoreError;

    /// Case-insensitive, so `high`, `High` and `HIGH` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Ok(Severity::High),
            "MED" => Ok(Severity::Med),
            "LOW" => Ok(Severity::Low),
            _ => Err(CoreError::InvalidSeverity(s.to_string())),
        }
    }
}

/// The decision a reviewer takes on a pending item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionAction {
    /// The claim is confirmed as misinformation and the correction goes out.
    Approve,
    /// The flag is dismissed.
    Reject,
}

impl ResolutionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionAction::Approve => "approve",
            ResolutionAction::Reject => "reject",
        }
    }

    /// Whether this decision counts towards the `blocked` statistic.
    pub fn blocks(&self) -> bool {
        matches!(self, ResolutionAction::Approve)
    }
}

impl fmt::Display for ResolutionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolutionAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approve" => Ok(ResolutionAction::Approve),
            "reject" => Ok(ResolutionAction::Reject),
            _ => Err(CoreError::InvalidAction(s.to_string())),
        }
    }
}

/// The correction that would be published if the item is approved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedPublication {
    pub title: String,
    pub content: String,
    pub channels: Vec<String>,
    pub expected_reach: String,
}

/// Analyst report attached to a flagged claim. Opaque to the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullReport {
    pub claim: String,
    pub source: String,
    pub detected_at: String,
    pub reach: String,
    pub platform: String,
    pub ai_confidence: u8,
    pub reasoning: String,
    pub recommended_action: String,
    pub related_links: Vec<String>,
    pub proposed_publication: ProposedPublication,
}

/// A flagged claim awaiting (or having received) a human decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    pub id: ReviewItemId,
    pub text: String,
    pub severity: Severity,
    /// Human-readable age of the detection, e.g. "5m ago".
    pub time: String,
    pub narrative_count: u32,
    pub narrative_type: String,
    pub full_report: FullReport,
}

/// Metadata stamped on an item when a reviewer decides on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub resolved_at: DateTime<Utc>,
    pub resolved_action: ResolutionAction,
    pub resolved_by: String,
}

/// An item together with its resolution.
///
/// Serialized flat, so clients see the item's own fields plus
/// `resolvedAt`, `resolvedAction` and `resolvedBy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedItem {
    #[serde(flatten)]
    pub item: ReviewItem,
    #[serde(flatten)]
    pub resolution: Resolution,
}

impl ResolvedItem {
    pub fn id(&self) -> ReviewItemId {
        self.item.id
    }

    /// Drop the resolution, returning the item as it was before the decision.
    pub fn into_pending(self) -> ReviewItem {
        self.item
    }
}
