//! Decoding of raw per-family reference documents.
//!
//! A document is a JSON object keyed by identifier. Each value is either a
//! display name or a list of candidate display names.

use serde::de::IgnoredAny;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Identifier to display name, one per family.
pub type FamilyMap = HashMap<String, String>;

/// The value stored under one identifier in a raw document.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawName {
    /// A single display name
    Single(String),
    /// Candidate display names, first usable one wins
    Candidates(Vec<Candidate>),
    /// Anything else; never yields a name
    Unsupported(IgnoredAny),
}

/// One element of a candidate list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Candidate {
    /// A candidate display name
    Text(String),
    /// A non-string element, skipped
    Other(IgnoredAny),
}

impl RawName {
    /// The first non-empty trimmed name, if any.
    #[must_use]
    pub fn resolve(&self) -> Option<&str> {
        match self {
            Self::Single(name) => Some(name.trim()).filter(|name| !name.is_empty()),
            Self::Candidates(candidates) => candidates.iter().find_map(|candidate| match candidate {
                Candidate::Text(name) => Some(name.trim()).filter(|name| !name.is_empty()),
                Candidate::Other(_) => None,
            }),
            Self::Unsupported(_) => None,
        }
    }
}

/// Parse a raw document, keeping the unresolved values.
///
/// # Errors
/// Returns error if the text is not a JSON object.
pub fn parse_document(text: &str) -> serde_json::Result<BTreeMap<String, RawName>> {
    serde_json::from_str(text)
}

/// Collapse raw values to display names, dropping entries with none.
#[must_use]
pub fn normalize(raw: &BTreeMap<String, RawName>) -> FamilyMap {
    raw.iter()
        .filter_map(|(identifier, value)| {
            value
                .resolve()
                .map(|name| (identifier.clone(), name.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> BTreeMap<String, RawName> {
        parse_document(text).expect("parse document")
    }

    #[test]
    fn test_single_name_is_trimmed() {
        let raw = parse(r#"{"iPhone16,1": "  iPhone 15 Pro \n"}"#);
        let map = normalize(&raw);
        assert_eq!(map.get("iPhone16,1").map(String::as_str), Some("iPhone 15 Pro"));
    }

    #[test]
    fn test_candidates_first_non_empty_wins() {
        let raw = parse(r#"{"iMac11,2": ["", "   ", 42, "iMac (21.5-inch, Mid 2010)", "Other"]}"#);
        let map = normalize(&raw);
        assert_eq!(
            map.get("iMac11,2").map(String::as_str),
            Some("iMac (21.5-inch, Mid 2010)")
        );
    }

    #[test]
    fn test_entries_without_a_name_are_dropped() {
        let raw = parse(
            r#"{
                "Blank": "   ",
                "EmptyList": [],
                "NoStrings": [1, null, {"a": "b"}],
                "Number": 7,
                "Object": {"name": "x"},
                "Null": null,
                "Watch1,1": "Apple Watch (1st generation) 38mm"
            }"#,
        );
        assert_eq!(raw.len(), 7);

        let map = normalize(&raw);
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("Watch1,1"));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let raw = parse(r#"{"iPhone1,1": "iPhone", "IPHONE1,1": "  "}"#);
        let map = normalize(&raw);
        assert!(map.contains_key("iPhone1,1"));
        assert!(!map.contains_key("IPHONE1,1"));
    }

    #[test]
    fn test_non_object_documents_fail() {
        assert!(parse_document(r#"["iPhone1,1"]"#).is_err());
        assert!(parse_document("not json").is_err());
        assert!(parse_document("").is_err());
    }
}
