//! Core error types for devicemodel.
//!
//! Lookups never surface errors to callers. These types cover the edges
//! that can fail loudly: configuration and platform parsing.

use thiserror::Error;

/// Central error type for devicemodel operations.
#[derive(Error, Debug)]
pub enum DeviceModelError {
    /// Validation errors (unknown platform tag, inconsistent lookup result)
    #[error("validation error: {0}")]
    Validation(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Config file not found
    #[error("config file not found at {path}")]
    NotFound {
        /// Path where config was expected
        path: String,
    },

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DeviceModelError::Validation("unknown platform tag 'android'".to_string());
        assert_eq!(
            err.to_string(),
            "validation error: unknown platform tag 'android'"
        );

        let err = ConfigError::InvalidValue {
            field: "sync.retries".to_string(),
            reason: "must be at least 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value for sync.retries: must be at least 1"
        );
    }
}
