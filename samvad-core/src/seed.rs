//! Static data compiled into the binary.
//!
//! Every process starts from these tables; nothing is written back.

use crate::analytics::{FlaggedPost, RegionalThreat};
use crate::error::CoreError;
use crate::review::ReviewItem;
use crate::triage::TriageTable;

const REVIEW_SEED_JSON: &str = include_str!("../data/review_seed.json");
const TRIAGE_RULES_JSON: &str = include_str!("../data/triage_rules.json");
const REGIONS_JSON: &str = include_str!("../data/regions.json");
const FLAGGED_POSTS_JSON: &str = include_str!("../data/flagged_posts.json");

/// Historical count of fact-check queries before this process started.
pub const SEED_QUERIES: u64 = 24592;

/// Historical count of approved (blocked) claims before this process started.
pub const SEED_BLOCKED: u64 = 8204;

/// Items waiting in the review queue at startup, oldest first.
pub fn review_items() -> Result<Vec<ReviewItem>, CoreError> {
    serde_json::from_str(REVIEW_SEED_JSON).map_err(|e| CoreError::parse("review seed", e))
}

/// The built-in keyword table for the triage matcher.
pub fn triage_table() -> Result<TriageTable, CoreError> {
    TriageTable::from_json(TRIAGE_RULES_JSON)
}

pub fn regions() -> Result<Vec<RegionalThreat>, CoreError> {
    serde_json::from_str(REGIONS_JSON).map_err(|e| CoreError::parse("regional data", e))
}

pub fn flagged_posts() -> Result<Vec<FlaggedPost>, CoreError> {
    serde_json::from_str(FLAGGED_POSTS_JSON).map_err(|e| CoreError::parse("flagged posts", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_tables_parse() {
        let items = review_items().unwrap();
        assert_eq!(
            items.iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![101, 102, 103, 104, 105]
        );
        assert_eq!(regions().unwrap().len(), 8);
        assert_eq!(flagged_posts().unwrap().len(), 5);
        assert_eq!(triage_table().unwrap().rules().len(), 9);
    }
}
