//! Provenance of the loaded reference data.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Where and when the reference data was last synchronized.
///
/// Every field defaults to empty. A field that is missing, `null` or of the
/// wrong type reads as empty without affecting the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamMeta {
    /// Upstream repository, `owner/name`
    #[serde(deserialize_with = "lenient")]
    pub upstream_repo: String,
    /// Selected ref, labelled with its kind (`tag:v2025.09`)
    #[serde(deserialize_with = "lenient")]
    pub upstream_ref: String,
    /// Commit the ref resolved to
    #[serde(deserialize_with = "lenient")]
    pub upstream_sha: String,
    /// Sync time, `YYYY-MM-DDTHH:MM:SSZ`
    #[serde(deserialize_with = "lenient")]
    pub synced_at_utc: String,
    /// Entries written per family
    #[serde(deserialize_with = "lenient")]
    pub counts: BTreeMap<String, usize>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

impl UpstreamMeta {
    /// The provenance triple reported to callers.
    #[must_use]
    pub fn data_version(&self) -> DataVersion {
        DataVersion {
            repo: self.upstream_repo.clone(),
            reference: format!("{} sha:{}", self.upstream_ref, self.upstream_sha),
            synced_at_utc: self.synced_at_utc.clone(),
        }
    }
}

/// Diagnostic view of [`UpstreamMeta`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataVersion {
    /// Upstream repository
    pub repo: String,
    /// `"<ref> sha:<sha>"`
    pub reference: String,
    /// Sync timestamp, verbatim
    pub synced_at_utc: String,
}

impl From<DataVersion> for (String, String, String) {
    fn from(version: DataVersion) -> Self {
        (version.repo, version.reference, version.synced_at_utc)
    }
}

impl fmt::Display for DataVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {} (synced {})",
            self.repo, self.reference, self.synced_at_utc
        )
    }
}
