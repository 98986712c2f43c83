//! Error types for the sync job.

use devicemodel_core::{ConfigError, DeviceFamily};
use thiserror::Error;

/// Errors that can occur while synchronizing reference data.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Transport failure (connect, timeout, body read)
    #[error("request to {url} failed: {source}")]
    Http {
        /// Requested URL
        url: String,
        /// Underlying error
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status
    #[error("request to {url} returned status {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Response body was not the expected JSON
    #[error("invalid JSON from {url}: {source}")]
    Json {
        /// Requested URL
        url: String,
        /// JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A downloaded family document failed validation
    #[error("invalid {family} data: {reason}")]
    InvalidData {
        /// Family being validated
        family: DeviceFamily,
        /// Reason for rejection
        reason: String,
    },

    /// A ref could not be turned into a commit SHA
    #[error("could not resolve upstream ref: {0}")]
    RefResolution(String),

    /// Invalid command-line selection
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to serialize output
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// I/O error writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncError {
    /// Whether ref discovery should move on to its next strategy.
    #[must_use]
    pub fn is_not_found_or_forbidden(&self) -> bool {
        matches!(self, Self::Status { status: 403 | 404, .. })
    }
}

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignorable_statuses() {
        for (status, ignorable) in [(403, true), (404, true), (401, false), (500, false)] {
            let err = SyncError::Status {
                url: "https://api.github.com/x".to_string(),
                status,
            };
            assert_eq!(err.is_not_found_or_forbidden(), ignorable, "{status}");
        }
        assert!(!SyncError::RefResolution("x".to_string()).is_not_found_or_forbidden());
    }

    #[test]
    fn test_error_display() {
        let err = SyncError::InvalidData {
            family: DeviceFamily::Tvos,
            reason: "too few entries: 2 < 5".to_string(),
        };
        assert_eq!(err.to_string(), "invalid tvos data: too few entries: 2 < 5");
    }
}
