//! Where reference documents come from.

use crate::error::{CatalogError, Result};
use std::borrow::Cow;
use std::path::PathBuf;

/// File name of the upstream metadata document.
pub const METADATA_FILE: &str = "UPSTREAM.json";

const EMBEDDED: [(&str, &str); 6] = [
    (
        "ios-device-identifiers.json",
        include_str!("../data/ios-device-identifiers.json"),
    ),
    (
        "mac-device-identifiers.json",
        include_str!("../data/mac-device-identifiers.json"),
    ),
    (
        "tvos-device-identifiers.json",
        include_str!("../data/tvos-device-identifiers.json"),
    ),
    (
        "watchos-device-identifiers.json",
        include_str!("../data/watchos-device-identifiers.json"),
    ),
    (
        "visionos-device-identifiers.json",
        include_str!("../data/visionos-device-identifiers.json"),
    ),
    (METADATA_FILE, include_str!("../data/UPSTREAM.json")),
];

/// A read-only store of reference documents, addressed by file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DataSource {
    /// Documents compiled into the binary
    #[default]
    Embedded,
    /// Documents read from a directory at load time
    Directory(PathBuf),
}

impl DataSource {
    /// Read a document by file name.
    ///
    /// # Errors
    /// Returns error if the document is missing or unreadable.
    pub fn read(&self, name: &str) -> Result<Cow<'static, str>> {
        match self {
            Self::Embedded => EMBEDDED
                .iter()
                .find(|(file, _)| *file == name)
                .map(|(_, contents)| Cow::Borrowed(*contents))
                .ok_or_else(|| CatalogError::SourceUnavailable {
                    name: name.to_string(),
                }),
            Self::Directory(dir) => {
                let path = dir.join(name);
                std::fs::read_to_string(&path)
                    .map(Cow::Owned)
                    .map_err(|source| CatalogError::ReadError {
                        path: path.display().to_string(),
                        source,
                    })
            }
        }
    }

    /// Human-readable location of a document, for log messages.
    #[must_use]
    pub fn describe(&self, name: &str) -> String {
        match self {
            Self::Embedded => format!("embedded:{name}"),
            Self::Directory(dir) => dir.join(name).display().to_string(),
        }
    }
}
