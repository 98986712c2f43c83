//! Error types for reference data loading.
//!
//! These never reach lookup callers. The loader turns every one of them into
//! an empty family mapping or an empty metadata record.

use thiserror::Error;

/// Errors that can occur while loading a reference document.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The source has no document under this name
    #[error("reference document not available: {name}")]
    SourceUnavailable {
        /// Document file name
        name: String,
    },

    /// Failed to read the document
    #[error("failed to read reference document {path}: {source}")]
    ReadError {
        /// Path or name of the document
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the document as JSON
    #[error("failed to parse reference document {path}: {source}")]
    ParseError {
        /// Path or name of the document
        path: String,
        /// JSON parse error
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for catalog loading.
pub type Result<T> = std::result::Result<T, CatalogError>;
