//! Validation of downloaded family documents.
//!
//! Stricter than the runtime loader: every entry must resolve to a name.

use crate::error::{Result, SyncError};
use devicemodel_catalog::document::RawName;
use devicemodel_core::DeviceFamily;
use std::collections::BTreeMap;

/// Minimum entries a family document must carry.
#[must_use]
pub fn min_count(family: DeviceFamily) -> usize {
    match family {
        DeviceFamily::Ios => 100,
        DeviceFamily::Mac => 50,
        DeviceFamily::Tvos => 5,
        DeviceFamily::Watchos => 20,
        DeviceFamily::Visionos => 1,
    }
}

/// Parse and normalize a downloaded document.
///
/// # Errors
/// Returns error if the document is not a JSON object, has too few entries,
/// holds a value with no usable name, or (for `ios`) has no `iPhone` key.
pub fn validate_mapping(blob: &[u8], family: DeviceFamily) -> Result<BTreeMap<String, String>> {
    let invalid = |reason: String| SyncError::InvalidData { family, reason };

    let value: serde_json::Value =
        serde_json::from_slice(blob).map_err(|e| invalid(format!("not valid JSON: {e}")))?;
    if !value.is_object() {
        return Err(invalid("expected a JSON object".to_string()));
    }

    let raw: BTreeMap<String, RawName> =
        serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;

    let min = min_count(family);
    if raw.len() < min {
        return Err(invalid(format!("too few entries: {} < {min}", raw.len())));
    }

    let mut normalized = BTreeMap::new();
    for (identifier, value) in &raw {
        let name = value
            .resolve()
            .ok_or_else(|| invalid(format!("no usable name for {identifier:?}")))?;
        normalized.insert(identifier.clone(), name.to_string());
    }

    if family == DeviceFamily::Ios && !normalized.keys().any(|k| k.starts_with("iPhone")) {
        return Err(invalid("no iPhone-prefixed identifiers".to_string()));
    }

    Ok(normalized)
}
