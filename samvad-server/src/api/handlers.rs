//! HTTP handlers for the citizen and admin APIs.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

use samvad_core::{
    FlaggedPost, RegionalThreat, ResolutionAction, ResolvedItem, ReviewItem, ReviewItemId,
    Severity, Stats, TimeScale, TimeSeriesPoint, TriageRecord,
};

use super::types::{FeedParams, MutationResponse, ResolveRequest, TimeSeriesParams, VerifyRequest};
use crate::error::ApiError;
use crate::AppState;

/// Handler: GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "samvad",
        "version": crate::get_version(),
    }))
}

/// Handler: GET /help
pub async fn help_handler() -> Json<Value> {
    Json(json!({
        "service": "samvad",
        "version": crate::get_version(),
        "description": "Misinformation monitoring: citizen fact-check lookup and an admin review queue",
        "endpoints": [
            { "path": "/health", "method": "GET", "description": "Health check" },
            { "path": "/api/stats", "method": "GET", "description": "Aggregate counters: queries, blocked, pending" },
            { "path": "/api/queue", "method": "GET", "description": "Items awaiting review, oldest first" },
            { "path": "/api/queue/{id}/resolve", "method": "POST", "description": "Approve or reject a pending item. Body: {\"action\": \"approve\"|\"reject\", \"resolvedBy\"?: string}" },
            { "path": "/api/resolved", "method": "GET", "description": "Resolved items, most recent first" },
            { "path": "/api/resolved/{id}/revert", "method": "POST", "description": "Return a resolved item to the queue" },
            { "path": "/api/verify", "method": "POST", "description": "Fact-check free text. Body: {\"query\": string}" },
            { "path": "/api/stats/timeseries", "method": "GET", "description": "Threat time series. Query: scale=hourly|daily|monthly" },
            { "path": "/api/stats/regional", "method": "GET", "description": "Threat counts by state" },
            { "path": "/api/tweets", "method": "GET", "description": "Flagged posts. Query: severity=HIGH|MED|LOW" }
        ],
        "configuration": {
            "optional_env_vars": [
                "PORT (default: 5001)",
                "VERIFY_DELAY_MS (default: 1500)",
                "ADMIN_ACTOR (default: Admin User)",
                "TRIAGE_RULES_PATH (default: built-in table)",
                "DECISION_LOG_PATH (default: disabled)",
                "RUST_LOG (default: info)"
            ]
        }
    }))
}

/// Handler: GET /api/stats
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<Stats> {
    Json(state.store.stats().await)
}

/// Handler: GET /api/queue
pub async fn get_queue(State(state): State<Arc<AppState>>) -> Json<Vec<ReviewItem>> {
    Json(state.store.pending().await)
}

/// Handler: GET /api/resolved
pub async fn get_resolved(State(state): State<Arc<AppState>>) -> Json<Vec<ResolvedItem>> {
    Json(state.store.resolved().await)
}

/// Handler: POST /api/queue/{id}/resolve
///
/// Returns 400 for a missing or unknown action and 404 if the item is not
/// pending. Neither case changes any counter.
pub async fn resolve_item(
    State(state): State<Arc<AppState>>,
    id: Result<Path<ReviewItemId>, PathRejection>,
    payload: Result<Json<ResolveRequest>, JsonRejection>,
) -> Result<Json<MutationResponse>, ApiError> {
    let Path(id) = id?;
    let Json(request) = payload?;

    let action: ResolutionAction = request
        .action
        .as_deref()
        .ok_or_else(|| ApiError::BadRequest("missing `action` (approve or reject)".to_string()))?
        .parse()?;

    let resolved_by = request
        .resolved_by
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| state.admin_actor.clone());

    let (_, stats) = state.store.resolve(id, action, &resolved_by).await?;

    Ok(Json(MutationResponse {
        success: true,
        stats,
    }))
}

/// Handler: POST /api/resolved/{id}/revert
pub async fn revert_item(
    State(state): State<Arc<AppState>>,
    id: Result<Path<ReviewItemId>, PathRejection>,
) -> Result<Json<MutationResponse>, ApiError> {
    let Path(id) = id?;

    let (_, stats) = state.store.revert(id).await?;

    Ok(Json(MutationResponse {
        success: true,
        stats,
    }))
}

/// Handler: POST /api/verify
///
/// Every well-formed request counts as a query, whether or not a rule matches.
pub async fn verify(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<TriageRecord>, ApiError> {
    let Json(request) = payload?;
    let query = request.query.unwrap_or_default();

    let total = state.store.record_query();
    let record = {
        let matched = state.triage.verify(&query);
        info!(
            record = matched.key,
            keyword = matched.keyword.unwrap_or("-"),
            queries = total,
            "Answered fact-check query"
        );
        matched.record.clone()
    };

    if !state.verify_delay.is_zero() {
        debug!("Delaying verify response by {:?}", state.verify_delay);
        tokio::time::sleep(state.verify_delay).await;
    }

    Ok(Json(record))
}

/// Handler: GET /api/stats/timeseries
///
/// Missing or unknown scales fall back to daily.
pub async fn get_time_series(
    State(state): State<Arc<AppState>>,
    params: Result<Query<TimeSeriesParams>, QueryRejection>,
) -> Result<Json<Vec<TimeSeriesPoint>>, ApiError> {
    let Query(params) = params?;
    let scale = TimeScale::parse_or_default(params.scale.as_deref());
    Ok(Json(state.analytics.time_series(scale).await))
}

/// Handler: GET /api/stats/regional
pub async fn get_regional(State(state): State<Arc<AppState>>) -> Json<Vec<RegionalThreat>> {
    Json(state.analytics.regional().await)
}

/// Handler: GET /api/tweets
///
/// An unrecognised severity is a 400 rather than an empty list. A blank
/// `severity=` means no filter.
pub async fn get_flagged_posts(
    State(state): State<Arc<AppState>>,
    params: Result<Query<FeedParams>, QueryRejection>,
) -> Result<Json<Vec<FlaggedPost>>, ApiError> {
    let Query(params) = params?;
    let severity = params
        .severity
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<Severity>)
        .transpose()?;
    Ok(Json(state.analytics.flagged_posts(severity).await))
}
