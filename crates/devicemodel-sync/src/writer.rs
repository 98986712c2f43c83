//! Output files written by the sync job.

use crate::error::Result;
use crate::resolve::ResolvedRef;
use devicemodel_core::DeviceFamily;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::debug;

/// File name the upstream license is stored under.
pub const LICENSE_FILE: &str = "LICENSE.apple-device-identifiers.txt";

/// Write a value as JSON with sorted keys, two-space indent and a trailing
/// newline. Parent directories are created.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    // Round-tripping through `Value` sorts struct fields as well as maps.
    let value = serde_json::to_value(value)?;
    let mut contents = serde_json::to_string_pretty(&value)?;
    contents.push('\n');
    write_bytes(path, contents.as_bytes())
}

/// Write raw bytes. Parent directories are created.
pub fn write_bytes(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

/// Render the Markdown sync report. Counts are listed in family order.
#[must_use]
pub fn render_report(
    repo: &str,
    resolved: &ResolvedRef,
    synced_at_utc: &str,
    counts: &BTreeMap<String, usize>,
) -> String {
    let mut report = String::new();
    let _ = writeln!(report, "# Sync Report");
    let _ = writeln!(report);
    let _ = writeln!(report, "- Upstream: `{repo}`");
    let _ = writeln!(report, "- Ref: `{}`", resolved.label());
    let _ = writeln!(report, "- SHA: `{}`", resolved.sha);
    let _ = writeln!(report, "- SyncedAt: `{synced_at_utc}`");
    let _ = writeln!(report);
    let _ = writeln!(report, "## Counts");
    let _ = writeln!(report);
    for family in DeviceFamily::ALL {
        if let Some(count) = counts.get(family.key()) {
            let _ = writeln!(report, "- {family}: `{count}`");
        }
    }
    report
}
