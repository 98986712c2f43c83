//! The lookup engine.
//!
//! [`DeviceLookup`] owns a [`CatalogLoader`] and a load-once gate. The first
//! query on any thread loads the catalog; concurrent first queries block on
//! the same load and every later query reads the loaded data without locking.

use crate::{
    catalog::Catalog,
    classify::classify,
    loader::CatalogLoader,
    metadata::DataVersion,
    source::DataSource,
};
use devicemodel_core::{LookupDetail, Platform, PlatformSelector};
use std::sync::OnceLock;

/// Families scanned, in order, when prefix classification finds nothing.
///
/// `ipados` is absent: it shares the `ios` mapping, so an unprefixed tablet
/// identifier reports as `ios`.
pub const FALLBACK_ORDER: [Platform; 5] = [
    Platform::Ios,
    Platform::MacOs,
    Platform::TvOs,
    Platform::WatchOs,
    Platform::VisionOs,
];

/// Resolves hardware identifiers to display names.
#[derive(Debug, Default)]
pub struct DeviceLookup {
    loader: CatalogLoader,
    catalog: OnceLock<Catalog>,
}

impl DeviceLookup {
    /// Create an engine over the given source. Nothing is read until the
    /// first query.
    #[must_use]
    pub fn new(source: DataSource) -> Self {
        Self {
            loader: CatalogLoader::new(source),
            catalog: OnceLock::new(),
        }
    }

    /// Create an engine over the embedded reference data.
    #[must_use]
    pub fn embedded() -> Self {
        Self::new(DataSource::Embedded)
    }

    /// The loaded catalog, loading it on first use.
    pub fn catalog(&self) -> &Catalog {
        self.catalog.get_or_init(|| self.loader.load_catalog())
    }

    /// Whether the catalog has been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.catalog.get().is_some()
    }

    /// Resolve an identifier, inferring its platform. Returns `""` when
    /// nothing matches.
    #[must_use]
    pub fn lookup(&self, identifier: &str) -> String {
        self.lookup_detailed(identifier).into_name()
    }

    /// Resolve an identifier and report which platform matched.
    ///
    /// Prefix classification is tried first. If it finds no name, each
    /// family in [`FALLBACK_ORDER`] is scanned for the exact identifier.
    #[must_use]
    pub fn lookup_detailed(&self, identifier: &str) -> LookupDetail {
        let catalog = self.catalog();

        let identifier = identifier.trim();
        if identifier.is_empty() {
            return LookupDetail::default();
        }

        if let Some(platform) = classify(identifier) {
            if let Some(name) = catalog.get(platform, identifier) {
                return LookupDetail::found(platform, name);
            }
        }

        FALLBACK_ORDER
            .into_iter()
            .find_map(|platform| {
                catalog
                    .get(platform, identifier)
                    .map(|name| LookupDetail::found(platform, name))
            })
            .unwrap_or_default()
    }

    /// Resolve an identifier against one platform's mapping only.
    ///
    /// An empty platform token falls through to [`DeviceLookup::lookup`].
    /// An unrecognized token never matches.
    #[must_use]
    pub fn lookup_with_platform(&self, platform: &str, identifier: &str) -> String {
        let catalog = self.catalog();

        let identifier = identifier.trim();
        if identifier.is_empty() {
            return String::new();
        }

        match PlatformSelector::parse(platform) {
            PlatformSelector::Auto => self.lookup(identifier),
            PlatformSelector::Known(platform) => catalog
                .get(platform, identifier)
                .map(ToString::to_string)
                .unwrap_or_default(),
            PlatformSelector::Unrecognized => String::new(),
        }
    }

    /// Provenance of the loaded data.
    #[must_use]
    pub fn data_version(&self) -> DataVersion {
        self.catalog().meta().data_version()
    }
}
