pub mod api;
pub mod config;
pub mod error;
pub mod journal;
pub mod store;

use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use samvad_core::{seed, AnalyticsProvider, MockAnalytics, TriageMatcher, TriageTable};

pub use config::Config;
pub use error::ApiError;
pub use journal::{Decision, DecisionEntry, DecisionJournal};
pub use store::MonitorStore;

mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub fn get_version() -> String {
    // Release builds may stamp a git hash; otherwise report the crate version
    if let Some(git_hash) = option_env!("SAMVAD_GIT_HASH") {
        if git_hash.len() >= 8 {
            git_hash[..8].to_string()
        } else {
            git_hash.to_string()
        }
    } else {
        built_info::PKG_VERSION.to_string()
    }
}

pub struct AppState {
    pub store: MonitorStore,
    pub triage: TriageMatcher,
    pub analytics: Arc<dyn AnalyticsProvider>,
    pub verify_delay: Duration,
    pub admin_actor: String,
}

impl AppState {
    /// Build the state a fresh process starts with.
    ///
    /// Opening the decision journal spawns its writer, so this must run inside
    /// a tokio runtime when `decision_log_path` is set.
    pub fn from_config(config: &Config) -> Result<Self> {
        let table = match &config.triage_rules_path {
            Some(path) => {
                info!("Loading triage table from {}", path.display());
                TriageTable::from_path(path).context("Failed to load triage table")?
            }
            None => seed::triage_table().context("Failed to load built-in triage table")?,
        };

        let mut store = MonitorStore::from_seed().context("Failed to load review queue seed")?;
        if let Some(path) = &config.decision_log_path {
            store = store.with_journal(DecisionJournal::new(path.clone())?);
        }

        Ok(Self {
            store,
            triage: TriageMatcher::new(table),
            analytics: Arc::new(
                MockAnalytics::from_seed().context("Failed to load analytics seed")?,
            ),
            verify_delay: config.verify_delay,
            admin_actor: config.admin_actor.clone(),
        })
    }
}

/// The full application: routes, request tracing and open CORS.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
