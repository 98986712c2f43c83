//! The immutable, fully loaded reference data.

use crate::document::FamilyMap;
use crate::metadata::UpstreamMeta;
use devicemodel_core::{DeviceFamily, Platform};
use std::collections::HashMap;

/// All family mappings plus provenance, as produced by one load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    families: HashMap<DeviceFamily, FamilyMap>,
    meta: UpstreamMeta,
}

impl Catalog {
    /// Assemble a catalog. Families absent from `families` read as empty.
    #[must_use]
    pub fn new(families: HashMap<DeviceFamily, FamilyMap>, meta: UpstreamMeta) -> Self {
        Self { families, meta }
    }

    /// The mapping backing a platform. `ipados` reads the `ios` mapping.
    #[must_use]
    pub fn mapping(&self, platform: Platform) -> Option<&FamilyMap> {
        self.family(platform.family())
    }

    /// The mapping for a family, if it was loaded.
    #[must_use]
    pub fn family(&self, family: DeviceFamily) -> Option<&FamilyMap> {
        self.families.get(&family)
    }

    /// Exact, case-sensitive lookup within one platform's mapping.
    #[must_use]
    pub fn get(&self, platform: Platform, identifier: &str) -> Option<&str> {
        self.get_in(platform.family(), identifier)
    }

    /// Exact, case-sensitive lookup within one family's mapping.
    #[must_use]
    pub fn get_in(&self, family: DeviceFamily, identifier: &str) -> Option<&str> {
        self.family(family)
            .and_then(|map| map.get(identifier))
            .map(String::as_str)
    }

    /// Number of entries loaded for a family.
    #[must_use]
    pub fn family_len(&self, family: DeviceFamily) -> usize {
        self.family(family).map_or(0, FamilyMap::len)
    }

    /// Number of entries across all families.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.families.values().map(FamilyMap::len).sum()
    }

    /// Provenance of the loaded data.
    #[must_use]
    pub fn meta(&self) -> &UpstreamMeta {
        &self.meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        let ios: FamilyMap = [("iPad16,3", "iPad Pro 11-inch (M4)"), ("iPhone1,1", "iPhone")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut families = HashMap::new();
        families.insert(DeviceFamily::Ios, ios);
        families.insert(DeviceFamily::Tvos, FamilyMap::new());
        Catalog::new(families, UpstreamMeta::default())
    }

    #[test]
    fn test_tablet_reads_phone_mapping() {
        let catalog = sample();
        assert_eq!(
            catalog.get(Platform::IpadOs, "iPad16,3"),
            catalog.get(Platform::Ios, "iPad16,3")
        );
        assert_eq!(catalog.get(Platform::IpadOs, "iPhone1,1"), Some("iPhone"));
    }

    #[test]
    fn test_missing_family_reads_empty() {
        let catalog = sample();
        assert!(catalog.mapping(Platform::MacOs).is_none());
        assert_eq!(catalog.get(Platform::MacOs, "iMac11,2"), None);
        assert_eq!(catalog.family_len(DeviceFamily::Mac), 0);
    }

    #[test]
    fn test_counts() {
        let catalog = sample();
        assert_eq!(catalog.family_len(DeviceFamily::Ios), 2);
        assert_eq!(catalog.family_len(DeviceFamily::Tvos), 0);
        assert_eq!(catalog.total_entries(), 2);
    }
}
