//! Dashboard analytics: threat time series, regional distribution and the
//! flagged-content feed.
//!
//! The queue and triage code never depend on this module. The server talks to
//! an [`AnalyticsProvider`]; [`MockAnalytics`] stands in for a real pipeline by
//! generating random series and serving the static tables.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration, Months, Timelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::review::Severity;
use crate::seed;

/// Granularity of a time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeScale {
    /// 24 points, one per hour.
    Hourly,
    /// 30 points, one per day.
    #[default]
    Daily,
    /// 12 points, one per month.
    Monthly,
}

impl TimeScale {
    /// Parse a scale, falling back to [`TimeScale::Daily`] for anything
    /// missing or unrecognised.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    pub fn points(&self) -> usize {
        match self {
            TimeScale::Hourly => 24,
            TimeScale::Daily => 30,
            TimeScale::Monthly => 12,
        }
    }

    /// Half-open ranges for generated `(threats, blocked)` values.
    fn ranges(&self) -> (std::ops::Range<u32>, std::ops::Range<u32>) {
        match self {
            TimeScale::Hourly => (20..70, 10..40),
            TimeScale::Daily => (200..600, 100..350),
            TimeScale::Monthly => (4000..12000, 2000..7000),
        }
    }
}

impl FromStr for TimeScale {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hourly" => Ok(TimeScale::Hourly),
            "daily" => Ok(TimeScale::Daily),
            "monthly" => Ok(TimeScale::Monthly),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// RFC 3339 timestamp, or `YYYY-MM` for monthly points.
    pub time: String,
    pub label: String,
    pub threats: u32,
    pub blocked: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalThreat {
    pub state: String,
    pub lat: f64,
    pub lng: f64,
    pub threats: u32,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    pub likes: u32,
    pub retweets: u32,
}

/// What the official accounts did about a flagged post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseActivity {
    pub replied: bool,
    pub reposted: bool,
    pub replied_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reposted_at: Option<String>,
    pub official_account: String,
    pub reply_engagement: Engagement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repost_engagement: Option<Engagement>,
}

/// A social media post picked up by monitoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlaggedPost {
    pub id: String,
    pub author: String,
    pub author_image: String,
    pub content: String,
    pub timestamp: String,
    pub likes: u32,
    pub retweets: u32,
    pub platform: String,
    pub severity: Severity,
    pub verified: bool,
    pub detected_issue: String,
    pub samvad_response: ResponseActivity,
}

/// Source of the dashboard's analytics data.
#[async_trait]
pub trait AnalyticsProvider: Send + Sync {
    /// Threat counts over time, oldest first.
    async fn time_series(&self, scale: TimeScale) -> Vec<TimeSeriesPoint>;

    /// Threat counts by state.
    async fn regional(&self) -> Vec<RegionalThreat>;

    /// Flagged posts, optionally restricted to one severity.
    async fn flagged_posts(&self, severity: Option<Severity>) -> Vec<FlaggedPost>;
}

/// Random series plus the built-in regional and feed tables.
#[derive(Debug, Clone)]
pub struct MockAnalytics {
    regions: Vec<RegionalThreat>,
    posts: Vec<FlaggedPost>,
}

impl MockAnalytics {
    pub fn new(regions: Vec<RegionalThreat>, posts: Vec<FlaggedPost>) -> Self {
        Self { regions, posts }
    }

    /// Build from the embedded seed tables.
    pub fn from_seed() -> Result<Self, CoreError> {
        Ok(Self::new(seed::regions()?, seed::flagged_posts()?))
    }
}

#[async_trait]
impl AnalyticsProvider for MockAnalytics {
    async fn time_series(&self, scale: TimeScale) -> Vec<TimeSeriesPoint> {
        generate_series(scale, Utc::now(), &mut rand::thread_rng())
    }

    async fn regional(&self) -> Vec<RegionalThreat> {
        self.regions.clone()
    }

    async fn flagged_posts(&self, severity: Option<Severity>) -> Vec<FlaggedPost> {
        self.posts
            .iter()
            .filter(|post| severity.map_or(true, |s| post.severity == s))
            .cloned()
            .collect()
    }
}

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Generate a random series of `scale.points()` entries ending at `now`.
pub fn generate_series<R: Rng>(
    scale: TimeScale,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<TimeSeriesPoint> {
    let (threats, blocked) = scale.ranges();
    let count = scale.points();

    (0..count)
        .rev()
        .map(|offset| {
            let (time, label) = point_time(scale, now, offset as u32);
            TimeSeriesPoint {
                time,
                label,
                threats: rng.gen_range(threats.clone()),
                blocked: rng.gen_range(blocked.clone()),
            }
        })
        .collect()
}

/// Timestamp and display label for the point `offset` steps before `now`.
///
/// Hour and day labels are taken in UTC, not the server's local zone, so the
/// same instant gets the same label on every host.
fn point_time(scale: TimeScale, now: DateTime<Utc>, offset: u32) -> (String, String) {
    match scale {
        TimeScale::Hourly => {
            let at = now - Duration::hours(i64::from(offset));
            (at.to_rfc3339(), format!("{}:00", at.hour()))
        }
        TimeScale::Daily => {
            let at = now - Duration::days(i64::from(offset));
            (at.to_rfc3339(), format!("{}/{}", at.day(), at.month()))
        }
        TimeScale::Monthly => {
            let at = now
                .date_naive()
                .with_day(1)
                .and_then(|first| first.checked_sub_months(Months::new(offset)))
                .unwrap_or_else(|| now.date_naive());
            (
                format!("{}-{:02}", at.year(), at.month()),
                MONTH_ABBREVIATIONS[at.month0() as usize].to_string(),
            )
        }
    }
}
