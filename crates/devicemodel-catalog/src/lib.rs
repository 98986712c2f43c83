//! Devicemodel Catalog - Apple hardware identifier to marketing name lookup.
//!
//! Resolves identifiers such as `iPhone18,1` or `Mac14,2` to display names
//! using reference data synchronized from
//! [apple-device-identifiers](https://github.com/kyle-seongwoo-jun/apple-device-identifiers).
//!
//! # Architecture
//!
//! - **Sources** ([`source`]): Embedded documents or a directory on disk
//! - **Documents** ([`document`]): Raw JSON decoding and name resolution
//! - **Loader** ([`loader`]): Per-family loading that degrades to empty on failure
//! - **Catalog** ([`catalog`]): The immutable loaded mappings and metadata
//! - **Classifier** ([`classify`]): Platform inference from identifier prefixes
//! - **Lookup** ([`lookup`]): The engine and its load-once gate
//!
//! Lookups never fail. No match, an unrecognized platform and a broken
//! reference document all read as an empty result.
//!
//! # Example
//!
//! ```rust
//! let detail = devicemodel_catalog::lookup_detailed("iPad16,3");
//! assert_eq!(detail.platform_tag(), "ipados");
//! assert!(!detail.name().is_empty());
//!
//! assert_eq!(devicemodel_catalog::lookup_with_platform("android", "SM-S9280"), "");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod catalog;
pub mod classify;
pub mod document;
pub mod error;
pub mod loader;
pub mod lookup;
pub mod metadata;
pub mod source;

use devicemodel_core::{AppConfig, ConfigResult, LookupDetail};
use std::sync::OnceLock;
use tracing::warn;

// Re-export commonly used types
pub use catalog::Catalog;
pub use document::FamilyMap;
pub use error::{CatalogError, Result};
pub use loader::CatalogLoader;
pub use lookup::{DeviceLookup, FALLBACK_ORDER};
pub use metadata::{DataVersion, UpstreamMeta};
pub use source::DataSource;

/// The process-wide engine behind the free functions.
///
/// Its source comes from `DEVICEMODEL_DATA_DIR` or the config file's
/// `data.dir`, else the embedded documents.
pub fn shared() -> &'static DeviceLookup {
    static SHARED: OnceLock<DeviceLookup> = OnceLock::new();
    SHARED.get_or_init(|| DeviceLookup::new(configured_source()))
}

fn configured_source() -> DataSource {
    source_from(AppConfig::load_with_env())
}

fn source_from(config: ConfigResult<AppConfig>) -> DataSource {
    match config {
        Ok(config) => config
            .data
            .dir
            .map_or(DataSource::Embedded, DataSource::Directory),
        Err(e) => {
            warn!(error = %e, "failed to load config, using embedded reference data");
            DataSource::Embedded
        }
    }
}

/// Resolve an identifier, inferring its platform. `""` when nothing matches.
#[must_use]
pub fn lookup(identifier: &str) -> String {
    shared().lookup(identifier)
}

/// Resolve an identifier and report the matching platform.
#[must_use]
pub fn lookup_detailed(identifier: &str) -> LookupDetail {
    shared().lookup_detailed(identifier)
}

/// Resolve an identifier within one platform. `""` for unrecognized
/// platforms; an empty platform auto-detects.
#[must_use]
pub fn lookup_with_platform(platform: &str, identifier: &str) -> String {
    shared().lookup_with_platform(platform, identifier)
}

/// Provenance of the loaded reference data.
#[must_use]
pub fn data_version() -> DataVersion {
    shared().data_version()
}

#[cfg(test)]
mod tests {
    use super::*;
    use devicemodel_core::ConfigError;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_source_defaults_to_embedded() {
        assert_eq!(source_from(Ok(AppConfig::default())), DataSource::Embedded);
    }

    #[test]
    fn test_source_from_data_dir() {
        let mut config = AppConfig::default();
        config.data.dir = Some(PathBuf::from("/srv/devicemodel"));
        assert_eq!(
            source_from(Ok(config)),
            DataSource::Directory(PathBuf::from("/srv/devicemodel"))
        );
    }

    #[test]
    fn test_source_falls_back_on_config_error() {
        assert_eq!(source_from(Err(ConfigError::NoConfigDir)), DataSource::Embedded);
    }

    #[test]
    fn test_bad_sync_section_keeps_data_dir() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[data]\ndir = \"/srv/devicemodel\"\n\n[sync]\nretries = 0\n")
            .expect("write config");

        let config = AppConfig::load_from(&path).and_then(|config| {
            config.validate_data()?;
            Ok(config)
        });
        assert_eq!(
            source_from(config),
            DataSource::Directory(PathBuf::from("/srv/devicemodel"))
        );
    }
}
