//! The override table consulted by `$[cd_overridden]` directives.
//!
//! Built from a whitespace-separated list of `Name=<key>,Value=<value>`
//! tokens plus the synthetic bucket and prefix entries.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use cideploy_common::constants::{BUCKET_OVERRIDE_KEY, KEY_PREFIX_OVERRIDE_KEY};
use cideploy_common::types::S3Location;
use regex::Regex;

#[allow(clippy::expect_used)]
static OVERRIDE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Name=(\S+),Value=(\S+)$").expect("override token pattern is valid")
});

/// Read-only mapping from override key to value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    entries: BTreeMap<String, String>,
}

impl OverrideTable {
    /// Parses an override specification.
    ///
    /// Tokens that are not of the form `Name=<key>,Value=<value>` are
    /// skipped. When a key repeats, the last occurrence wins.
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        let mut entries = BTreeMap::new();
        for token in spec.split_whitespace() {
            let Some(caps) = OVERRIDE_TOKEN.captures(token) else {
                tracing::debug!(token, "ignoring malformed override token");
                continue;
            };
            let _ = entries.insert(caps[1].to_string(), caps[2].to_string());
        }
        Self { entries }
    }

    /// Adds or replaces a single entry.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.entries.insert(key.into(), value.into());
        self
    }

    /// Inserts the bucket name and the slash-terminated key prefix.
    ///
    /// These are applied last, so they replace any user entry with the
    /// same key.
    #[must_use]
    pub fn with_synthetic(self, location: &S3Location) -> Self {
        self.with_entry(BUCKET_OVERRIDE_KEY, location.bucket())
            .with_entry(KEY_PREFIX_OVERRIDE_KEY, location.prefix_with_slash())
    }

    /// Looks up an override value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_multiple_tokens() {
        let table = OverrideTable::parse("Name=A,Value=1 Name=B,Value=2");
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("A"), Some("1"));
        assert_eq!(table.get("B"), Some("2"));
    }

    #[test]
    fn parse_last_occurrence_wins() {
        let table = OverrideTable::parse("Name=A,Value=1 Name=A,Value=2");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("A"), Some("2"));
    }

    #[test]
    fn parse_drops_malformed_tokens() {
        let table = OverrideTable::parse("Name=A Name=B,Value=2 garbage Value=3");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("A"), None);
        assert_eq!(table.get("B"), Some("2"));
    }

    #[test]
    fn parse_is_case_insensitive_on_labels_only() {
        let table = OverrideTable::parse("name=Key,VALUE=MixedCase");
        assert_eq!(table.get("Key"), Some("MixedCase"));
    }

    #[test]
    fn parse_empty_and_blank_input() {
        assert!(OverrideTable::parse("").is_empty());
        assert!(OverrideTable::parse("   \n\t ").is_empty());
    }

    #[test]
    fn parse_tolerates_mixed_whitespace() {
        let table = OverrideTable::parse("\tName=A,Value=1\n\nName=B,Value=x=y ");
        assert_eq!(table.get("A"), Some("1"));
        assert_eq!(table.get("B"), Some("x=y"));
    }

    #[test]
    fn reparsing_serialized_form_is_stable() {
        let table = OverrideTable::parse("Name=A,Value=1 Name=B,Value=2");
        let serialized: Vec<String> = table
            .iter()
            .map(|(k, v)| format!("Name={k},Value={v}"))
            .collect();
        assert_eq!(OverrideTable::parse(&serialized.join(" ")), table);
    }

    #[test]
    fn synthetic_entries_take_precedence() {
        let table = OverrideTable::parse("Name=S3BucketName,Value=mine Name=Other,Value=o")
            .with_synthetic(&S3Location::new("deploy-bucket", "ci/build-7"));
        assert_eq!(table.get("S3BucketName"), Some("deploy-bucket"));
        assert_eq!(table.get("S3KeyPrefix"), Some("ci/build-7/"));
        assert_eq!(table.get("Other"), Some("o"));
    }

    #[test]
    fn synthetic_prefix_has_single_trailing_slash() {
        let table = OverrideTable::default().with_synthetic(&S3Location::new("b", "p/"));
        assert_eq!(table.get("S3KeyPrefix"), Some("p/"));
    }
}
