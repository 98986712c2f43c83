//! Devicemodel Sync - Refresh reference data from the upstream repository.
//!
//! Resolves an upstream ref to a commit, downloads each family document,
//! validates and normalizes it, and rewrites the documents, `UPSTREAM.json`
//! and the upstream license in place. A Markdown report is written
//! alongside. Nothing is written unless every family validates.
//!
//! This is an offline batch job. The lookup engine never calls it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod client;
pub mod error;
pub mod resolve;
pub mod validate;
pub mod writer;

use chrono::{DateTime, Utc};
use devicemodel_catalog::{source::METADATA_FILE, UpstreamMeta};
use devicemodel_core::DeviceFamily;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

pub use client::GithubClient;
pub use error::{Result, SyncError};
pub use resolve::{RefKind, RefSelector, ResolvedRef};

/// What to sync and where to put it.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Upstream ref selection
    pub selector: RefSelector,
    /// Directory receiving the documents and metadata
    pub output_dir: PathBuf,
    /// Markdown report path
    pub report_path: PathBuf,
}

/// Outcome of a successful sync.
#[derive(Debug, Clone)]
pub struct SyncSummary {
    /// Upstream repository
    pub repo: String,
    /// Ref that was synced
    pub resolved: ResolvedRef,
    /// Sync time, `YYYY-MM-DDTHH:MM:SSZ`
    pub synced_at_utc: String,
    /// Entries written per family
    pub counts: BTreeMap<String, usize>,
}

/// Format a timestamp the way `UPSTREAM.json` stores it.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Run one sync.
pub async fn run_sync(client: &GithubClient, options: &SyncOptions) -> Result<SyncSummary> {
    let resolved = resolve::resolve(client, &options.selector).await?;

    let mut documents = Vec::with_capacity(DeviceFamily::ALL.len());
    for family in DeviceFamily::ALL {
        let blob = client.download_raw(&resolved.name, family.file_name()).await?;
        let mapping = validate::validate_mapping(&blob, family)?;
        info!(family = %family, count = mapping.len(), "validated family document");
        documents.push((family, mapping));
    }
    let license = client.download_raw(&resolved.name, "LICENSE").await?;

    let mut counts = BTreeMap::new();
    for (family, mapping) in &documents {
        writer::write_json(&options.output_dir.join(family.file_name()), mapping)?;
        counts.insert(family.key().to_string(), mapping.len());
    }
    writer::write_bytes(&options.output_dir.join(writer::LICENSE_FILE), &license)?;

    let synced_at_utc = format_timestamp(Utc::now());
    let meta = UpstreamMeta {
        upstream_repo: client.repo().to_string(),
        upstream_ref: resolved.label(),
        upstream_sha: resolved.sha.clone(),
        synced_at_utc: synced_at_utc.clone(),
        counts: counts.clone(),
    };
    writer::write_json(&options.output_dir.join(METADATA_FILE), &meta)?;

    let report = writer::render_report(client.repo(), &resolved, &synced_at_utc, &counts);
    writer::write_bytes(&options.report_path, report.as_bytes())?;

    info!(
        upstream = client.repo(),
        upstream_ref = %resolved.label(),
        sha = %resolved.sha,
        "sync complete"
    );

    Ok(SyncSummary {
        repo: client.repo().to_string(),
        resolved,
        synced_at_utc,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let at = Utc
            .with_ymd_and_hms(2025, 10, 2, 3, 14, 7)
            .single()
            .expect("valid timestamp");
        assert_eq!(format_timestamp(at), "2025-10-02T03:14:07Z");
    }
}
