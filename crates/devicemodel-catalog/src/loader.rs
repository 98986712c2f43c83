//! Reference data loading.
//!
//! Reads each family document and the upstream metadata from a
//! [`DataSource`]. A family whose document is missing or malformed loads as
//! an empty mapping; a bad metadata document loads as an empty record.
//! Failures are logged and never returned from [`CatalogLoader::load_catalog`].

use crate::{
    catalog::Catalog,
    document::{self, FamilyMap},
    error::{CatalogError, Result},
    metadata::UpstreamMeta,
    source::{DataSource, METADATA_FILE},
};
use devicemodel_core::DeviceFamily;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Loader for reference documents.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    source: DataSource,
}

impl CatalogLoader {
    /// Create a loader reading from the given source.
    #[must_use]
    pub fn new(source: DataSource) -> Self {
        Self { source }
    }

    /// Load every family and the metadata.
    #[must_use]
    pub fn load_catalog(&self) -> Catalog {
        let families: HashMap<DeviceFamily, FamilyMap> = DeviceFamily::ALL
            .into_iter()
            .map(|family| (family, self.load_family(family)))
            .collect();
        let meta = self.load_metadata();
        let catalog = Catalog::new(families, meta);

        info!(
            entries = catalog.total_entries(),
            upstream_ref = %catalog.meta().upstream_ref,
            "loaded device identifier catalog"
        );

        catalog
    }

    /// Load one family, degrading to an empty mapping on failure.
    #[must_use]
    pub fn load_family(&self, family: DeviceFamily) -> FamilyMap {
        match self.try_load_family(family) {
            Ok(map) => {
                debug!(family = %family, count = map.len(), "loaded family mapping");
                map
            }
            Err(e) => {
                warn!(
                    family = %family,
                    error = %e,
                    "failed to load family mapping, lookups against it will not match"
                );
                FamilyMap::new()
            }
        }
    }

    /// Load one family, reporting why it failed.
    ///
    /// # Errors
    /// Returns error if the document can't be read or isn't a JSON object.
    pub fn try_load_family(&self, family: DeviceFamily) -> Result<FamilyMap> {
        let name = family.file_name();
        let contents = self.source.read(name)?;
        let raw = document::parse_document(&contents).map_err(|source| {
            CatalogError::ParseError {
                path: self.source.describe(name),
                source,
            }
        })?;

        let map = document::normalize(&raw);
        let dropped = raw.len() - map.len();
        if dropped > 0 {
            debug!(family = %family, dropped, "skipped entries without a usable name");
        }

        Ok(map)
    }

    /// Load the metadata, degrading to an empty record on failure.
    #[must_use]
    pub fn load_metadata(&self) -> UpstreamMeta {
        self.try_load_metadata().unwrap_or_else(|e| {
            warn!(error = %e, "failed to load upstream metadata");
            UpstreamMeta::default()
        })
    }

    /// Load the metadata, reporting why it failed.
    ///
    /// # Errors
    /// Returns error if the document can't be read or parsed.
    pub fn try_load_metadata(&self) -> Result<UpstreamMeta> {
        let contents = self.source.read(METADATA_FILE)?;
        serde_json::from_str(&contents).map_err(|source| CatalogError::ParseError {
            path: self.source.describe(METADATA_FILE),
            source,
        })
    }
}
