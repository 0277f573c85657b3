//! Request and response bodies for the HTTP API.

use serde::{Deserialize, Serialize};

use samvad_core::Stats;

/// Body of `POST /api/queue/{id}/resolve`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    /// `approve` or `reject`. Kept as a string so a missing or unknown value
    /// is reported as a 400 with a readable message.
    pub action: Option<String>,
    /// Reviewer name. Falls back to the configured admin actor.
    pub resolved_by: Option<String>,
}

/// Body of `POST /api/verify`.
#[derive(Debug, Default, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// Response to a resolve or revert.
#[derive(Debug, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    pub stats: Stats,
}

#[derive(Debug, Default, Deserialize)]
pub struct TimeSeriesParams {
    pub scale: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedParams {
    pub severity: Option<String>,
}
