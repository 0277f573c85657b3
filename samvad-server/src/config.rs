use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Reviewer name stamped on decisions when the request does not supply one.
pub const DEFAULT_ADMIN_ACTOR: &str = "Admin User";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Pause before answering a fact-check query. Zero disables it.
    pub verify_delay: Duration,
    pub admin_actor: String,
    /// Replacement triage table. The embedded table is used when unset.
    pub triage_rules_path: Option<PathBuf>,
    /// Append-only JSONL journal of review decisions. Disabled when unset.
    pub decision_log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5001,
            verify_delay: Duration::from_millis(1500),
            admin_actor: DEFAULT_ADMIN_ACTOR.to_string(),
            triage_rules_path: None,
            decision_log_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_blank(lookup(key));
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .context("PORT must be a valid number")?,
            None => defaults.port,
        };

        let verify_delay = match get("VERIFY_DELAY_MS") {
            Some(value) => Duration::from_millis(
                value
                    .trim()
                    .parse::<u64>()
                    .context("VERIFY_DELAY_MS must be a whole number of milliseconds")?,
            ),
            None => defaults.verify_delay,
        };

        let admin_actor = get("ADMIN_ACTOR").unwrap_or(defaults.admin_actor);

        let triage_rules_path = get("TRIAGE_RULES_PATH").map(PathBuf::from);
        let decision_log_path = get("DECISION_LOG_PATH").map(PathBuf::from);

        Ok(Config {
            port,
            verify_delay,
            admin_actor,
            triage_rules_path,
            decision_log_path,
        })
    }
}

/// Returns None if the value is missing, empty, or contains only whitespace.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
