//! Domain primitive types used across the cideploy workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One `{ParameterKey, ParameterValue}` pair as it appears in parameter
/// documents and in the parameter file handed to stack creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterRecord {
    /// Template parameter name.
    #[serde(rename = "ParameterKey")]
    pub key: String,
    /// Literal value or directive text.
    #[serde(rename = "ParameterValue", default)]
    pub value: String,
}

impl ParameterRecord {
    /// Creates a record from a key and value.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A parameter moving through resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterEntry {
    /// Template parameter name.
    pub key: String,
    /// Value as written in the parameter document.
    pub raw_value: String,
    /// Final value; `None` until the entry has been resolved.
    pub resolved_value: Option<String>,
}

impl ParameterEntry {
    /// Creates an unresolved entry.
    #[must_use]
    pub fn new(key: impl Into<String>, raw_value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            raw_value: raw_value.into(),
            resolved_value: None,
        }
    }

    /// Consumes the entry and returns it with its final value set.
    #[must_use]
    pub fn resolved(mut self, value: String) -> Self {
        self.resolved_value = Some(value);
        self
    }

    /// Returns whether resolution has completed for this entry.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolved_value.is_some()
    }

    /// Returns the record to persist. Unresolved entries keep their raw value.
    #[must_use]
    pub fn to_record(&self) -> ParameterRecord {
        ParameterRecord {
            key: self.key.clone(),
            value: self
                .resolved_value
                .clone()
                .unwrap_or_else(|| self.raw_value.clone()),
        }
    }
}

impl From<ParameterRecord> for ParameterEntry {
    fn from(record: ParameterRecord) -> Self {
        Self::new(record.key, record.value)
    }
}

/// A bucket plus key prefix in object storage.
///
/// The prefix is stored without leading or trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct S3Location {
    bucket: String,
    prefix: String,
}

impl S3Location {
    /// Creates a location, normalizing slashes around the prefix.
    #[must_use]
    pub fn new(bucket: impl Into<String>, prefix: impl AsRef<str>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: prefix.as_ref().trim_matches('/').to_string(),
        }
    }

    /// Returns the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Returns the normalized prefix (no surrounding slashes).
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the prefix with a single trailing slash, or `""` when empty.
    #[must_use]
    pub fn prefix_with_slash(&self) -> String {
        if self.prefix.is_empty() {
            String::new()
        } else {
            format!("{}/", self.prefix)
        }
    }

    /// Returns the object key for `name` under this prefix.
    #[must_use]
    pub fn object_key(&self, name: &str) -> String {
        format!("{}{}", self.prefix_with_slash(), name.trim_start_matches('/'))
    }

    /// Returns the `s3://` URI of `name` under this prefix.
    #[must_use]
    pub fn object_uri(&self, name: &str) -> String {
        format!("s3://{}/{}", self.bucket, self.object_key(name))
    }

    /// Returns the virtual-hosted HTTPS URL of `name` in `region`.
    #[must_use]
    pub fn https_url(&self, region: &str, name: &str) -> String {
        format!(
            "https://{}.s3.{region}.amazonaws.com/{}",
            self.bucket,
            self.object_key(name)
        )
    }
}

impl fmt::Display for S3Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix.is_empty() {
            write!(f, "s3://{}", self.bucket)
        } else {
            write!(f, "s3://{}/{}", self.bucket, self.prefix)
        }
    }
}
