//! Devicemodel Core - Foundation crate for device model name resolution.
//!
//! This crate provides the shared types, error handling and configuration
//! that the catalog and sync crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Platform tags, backing families and lookup results
//!
//! # Example
//!
//! ```rust
//! use devicemodel_core::{Platform, PlatformSelector};
//!
//! assert_eq!(
//!     PlatformSelector::parse("  iPadOS "),
//!     PlatformSelector::Known(Platform::IpadOs)
//! );
//! assert_eq!(PlatformSelector::parse(""), PlatformSelector::Auto);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, DataConfig, LoggingConfig, SyncConfig};
pub use error::{ConfigError, ConfigResult, DeviceModelError};
pub use types::{DeviceFamily, LookupDetail, Platform, PlatformSelector};
