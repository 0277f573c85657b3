//! HTTP surface of the monitor.
//!
//! This module provides:
//! - Citizen fact-check lookup (`/api/verify`)
//! - The admin review queue and its counters
//! - Mock dashboard analytics (time series, regional data, flagged feed)

pub mod handlers;
pub mod types;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/help", get(handlers::help_handler))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/stats/timeseries", get(handlers::get_time_series))
        .route("/api/stats/regional", get(handlers::get_regional))
        .route("/api/queue", get(handlers::get_queue))
        .route("/api/queue/{id}/resolve", post(handlers::resolve_item))
        .route("/api/resolved", get(handlers::get_resolved))
        .route("/api/resolved/{id}/revert", post(handlers::revert_item))
        .route("/api/verify", post(handlers::verify))
        .route("/api/tweets", get(handlers::get_flagged_posts))
}
