//! Keyword triage for citizen fact-check queries.
//!
//! The input is lower-cased and tested against an ordered list of rules; the
//! first rule with a keyword contained in the input wins. Order is part of
//! the table: "gps chip in evm" resolves to the GPS record because the GPS
//! rule precedes the EVM rule.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Key of the record returned when no rule matches.
pub const DEFAULT_RECORD: &str = "default";

/// A canned fact-check answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageRecord {
    pub is_misinfo: bool,
    pub title: String,
    pub fact: String,
    pub source: String,
}

/// One entry of the ordered rule list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageRule {
    /// Lower-case substrings; any one of them triggers the rule.
    pub keywords: Vec<String>,
    /// Key into the table's records.
    pub record: String,
}

/// A validated rule table: every rule points at a known record, every keyword
/// is non-empty and lower-case, and a `default` record exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageTable {
    rules: Vec<TriageRule>,
    records: HashMap<String, TriageRecord>,
    default: TriageRecord,
}

#[derive(Deserialize)]
struct RawTable {
    rules: Vec<TriageRule>,
    records: HashMap<String, TriageRecord>,
}

impl TryFrom<RawTable> for TriageTable {
    type Error = CoreError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        TriageTable::new(raw.rules, raw.records)
    }
}

impl TriageTable {
    pub fn new(
        rules: Vec<TriageRule>,
        records: HashMap<String, TriageRecord>,
    ) -> Result<Self, CoreError> {
        let default = records
            .get(DEFAULT_RECORD)
            .cloned()
            .ok_or(CoreError::MissingDefault)?;

        for (index, rule) in rules.iter().enumerate() {
            if rule.keywords.is_empty() {
                return Err(CoreError::EmptyRule { index });
            }
            for keyword in &rule.keywords {
                if keyword.trim().is_empty() || keyword.to_lowercase() != *keyword {
                    return Err(CoreError::InvalidKeyword {
                        index,
                        keyword: keyword.clone(),
                    });
                }
            }
            if !records.contains_key(&rule.record) {
                return Err(CoreError::UnknownRecord {
                    index,
                    record: rule.record.clone(),
                });
            }
        }

        Ok(Self {
            rules,
            records,
            default,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let raw: RawTable =
            serde_json::from_str(json).map_err(|e| CoreError::parse("triage table", e))?;
        Self::try_from(raw)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn rules(&self) -> &[TriageRule] {
        &self.rules
    }

    pub fn record(&self, key: &str) -> Option<&TriageRecord> {
        self.records.get(key)
    }

    /// The answer given when no rule matches.
    pub fn default_record(&self) -> &TriageRecord {
        &self.default
    }
}

/// Result of a triage lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriageMatch<'a> {
    /// Record key, or [`DEFAULT_RECORD`] when nothing matched.
    pub key: &'a str,
    /// The keyword that triggered the match, if any.
    pub keyword: Option<&'a str>,
    pub record: &'a TriageRecord,
}

impl TriageMatch<'_> {
    pub fn is_default(&self) -> bool {
        self.keyword.is_none()
    }
}

/// Maps free text to a canned record using a [`TriageTable`].
#[derive(Debug, Clone)]
pub struct TriageMatcher {
    table: TriageTable,
}

impl TriageMatcher {
    pub fn new(table: TriageTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &TriageTable {
        &self.table
    }

    /// Return the record of the first matching rule, or the default record.
    pub fn verify(&self, query: &str) -> TriageMatch<'_> {
        let query = query.to_lowercase();

        for rule in &self.table.rules {
            if let Some(keyword) = rule.keywords.iter().find(|k| query.contains(k.as_str())) {
                if let Some(record) = self.table.records.get(&rule.record) {
                    return TriageMatch {
                        key: rule.record.as_str(),
                        keyword: Some(keyword.as_str()),
                        record,
                    };
                }
            }
        }

        TriageMatch {
            key: DEFAULT_RECORD,
            keyword: None,
            record: self.table.default_record(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> TriageMatcher {
        TriageMatcher::new(crate::seed::triage_table().unwrap())
    }

    fn record(title: &str) -> TriageRecord {
        TriageRecord {
            is_misinfo: true,
            title: title.to_string(),
            fact: "fact".to_string(),
            source: "source".to_string(),
        }
    }

    #[test]
    fn test_evm_claim_matches_evm_record() {
        let m = matcher();
        let result = m.verify("EVM hacking is real");
        // "hack" and "evm" both belong to the EVM rule.
        assert_eq!(result.key, "evm");
        assert_eq!(result.record.title, "False Claim: EVM Hacking");
        assert!(result.record.is_misinfo);
    }

    #[test]
    fn test_unrelated_text_gets_default() {
        let m = matcher();
        let result = m.verify("random unrelated text");
        assert!(result.is_default());
        assert_eq!(result.key, DEFAULT_RECORD);
        assert_eq!(result.record.title, "Context Required");
        assert!(!result.record.is_misinfo);
    }

    #[test]
    fn test_empty_query_gets_default() {
        assert!(matcher().verify("").is_default());
    }

    #[test]
    fn test_first_rule_wins() {
        let m = matcher();
        assert_eq!(m.verify("they will cancel the evm count").key, "cancel");
        assert_eq!(m.verify("gps chip in evm").key, "gps");
        assert_eq!(m.verify("EVM has WiFi").key, "bluetooth");
        assert_eq!(m.verify("is it expensive to stop elections").key, "cancel");
    }

    #[test]
    fn test_matching_is_substring_and_case_insensitive() {
        let m = matcher();
        assert_eq!(m.verify("Elections STOPPED?").key, "cancel");
        assert_eq!(m.verify("my aadhaar card").key, "aadhaar");
        assert!(!m.verify("aadhaar").record.is_misinfo);
        // "online" matches inside a longer word too.
        assert_eq!(m.verify("onlineportal for voters").key, "nri");
        // "ink" is a plain substring, so "think" also matches.
        assert_eq!(m.verify("I think so").key, "ink");
    }

    #[test]
    fn test_matched_keyword_is_reported() {
        let m = matcher();
        let result = m.verify("Will they delete my name?");
        assert_eq!(result.key, "delete");
        assert_eq!(result.keyword, Some("delete"));
    }

    #[test]
    fn test_table_requires_default() {
        let mut records = HashMap::new();
        records.insert("evm".to_string(), record("EVM"));
        let rules = vec![TriageRule {
            keywords: vec!["evm".to_string()],
            record: "evm".to_string(),
        }];
        assert!(matches!(
            TriageTable::new(rules, records),
            Err(CoreError::MissingDefault)
        ));
    }

    #[test]
    fn test_table_rejects_unknown_record() {
        let mut records = HashMap::new();
        records.insert(DEFAULT_RECORD.to_string(), record("Default"));
        let rules = vec![TriageRule {
            keywords: vec!["evm".to_string()],
            record: "evm".to_string(),
        }];
        assert!(matches!(
            TriageTable::new(rules, records),
            Err(CoreError::UnknownRecord { index: 0, .. })
        ));
    }

    #[test]
    fn test_table_rejects_upper_case_and_empty_keywords() {
        let mut records = HashMap::new();
        records.insert(DEFAULT_RECORD.to_string(), record("Default"));
        records.insert("evm".to_string(), record("EVM"));

        let upper = vec![TriageRule {
            keywords: vec!["EVM".to_string()],
            record: "evm".to_string(),
        }];
        assert!(matches!(
            TriageTable::new(upper, records.clone()),
            Err(CoreError::InvalidKeyword { index: 0, .. })
        ));

        let blank = vec![TriageRule {
            keywords: vec!["  ".to_string()],
            record: "evm".to_string(),
        }];
        assert!(matches!(
            TriageTable::new(blank, records.clone()),
            Err(CoreError::InvalidKeyword { .. })
        ));

        let none = vec![TriageRule {
            keywords: vec![],
            record: "evm".to_string(),
        }];
        assert!(matches!(
            TriageTable::new(none, records),
            Err(CoreError::EmptyRule { index: 0 })
        ));
    }

    #[test]
    fn test_custom_table_from_json() {
        let json = r#"{
            "rules": [{ "keywords": ["booth"], "record": "booth" }],
            "records": {
                "booth": { "isMisinfo": true, "title": "Booth", "fact": "f", "source": "s" },
                "default": { "isMisinfo": false, "title": "Default", "fact": "f", "source": "s" }
            }
        }"#;
        let m = TriageMatcher::new(TriageTable::from_json(json).unwrap());
        assert_eq!(m.verify("Booth capturing").record.title, "Booth");
        assert_eq!(m.verify("evm").record.title, "Default");
    }

    const BOOTH_TABLE: &str = r#"{
        "rules": [{ "keywords": ["booth", "queue"], "record": "booth" }],
        "records": {
            "booth": { "isMisinfo": true, "title": "False Claim: Booth Closed", "fact": "Booths stay open until the last voter in line has voted.", "source": "Returning Officer" },
            "default": { "isMisinfo": false, "title": "Ask Your Returning Officer", "fact": "f", "source": "s" }
        }
    }"#;

    #[test]
    fn test_table_from_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("rules.json");
        std::fs::write(&path, BOOTH_TABLE).unwrap();

        let table = TriageTable::from_path(&path).unwrap();
        assert_eq!(table.rules().len(), 1);
        assert_eq!(table.default_record().title, "Ask Your Returning Officer");

        let m = TriageMatcher::new(table);
        assert_eq!(m.verify("Long QUEUE at my booth").key, "booth");
        assert_eq!(
            m.verify("Long queue").record.title,
            "False Claim: Booth Closed"
        );
        // Keywords from the built-in table are gone.
        let fallback = m.verify("EVM hacking is real");
        assert!(fallback.is_default());
        assert_eq!(fallback.record.title, "Ask Your Returning Officer");
    }

    #[test]
    fn test_missing_table_path_is_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("absent.json");
        match TriageTable::from_path(&path) {
            Err(CoreError::Io { path: reported, .. }) => {
                assert!(reported.ends_with("absent.json"));
            }
            other => panic!("expected an IO error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_table_file_is_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("rules.json");
        std::fs::write(&path, r#"{ "rules": [], "records": {} }"#).unwrap();
        assert!(matches!(
            TriageTable::from_path(&path),
            Err(CoreError::MissingDefault)
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            TriageTable::from_json("{ not json"),
            Err(CoreError::Parse { .. })
        ));
    }
}
