//! Configuration management for devicemodel.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding [`DataConfig::dir`].
pub const ENV_DATA_DIR: &str = "DEVICEMODEL_DATA_DIR";
/// Environment variable overriding [`LoggingConfig::filter`].
pub const ENV_LOG: &str = "DEVICEMODEL_LOG";
/// Environment variable overriding [`SyncConfig::retries`].
pub const ENV_SYNC_RETRIES: &str = "DEVICEMODEL_SYNC_RETRIES";

/// Main configuration.
///
/// Loaded from `~/.config/devicemodel/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Reference data location
    pub data: DataConfig,
    /// Upstream synchronization settings
    pub sync: SyncConfig,
    /// Log filtering
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Load configuration with environment variable overrides, checking
    /// only the `data` section. This is what the lookup path reads; a bad
    /// `sync` section must not change where reference data comes from.
    ///
    /// Supports the following environment variables:
    /// - `DEVICEMODEL_DATA_DIR`: Read reference documents from this directory
    /// - `DEVICEMODEL_LOG`: Override the log filter
    /// - `DEVICEMODEL_SYNC_RETRIES`: Override the sync retry count
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate_data()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
            tracing::debug!("Override data.dir from env: {}", dir);
            self.data.dir = Some(PathBuf::from(dir));
        }

        if let Some(filter) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            tracing::debug!("Override logging.filter from env: {}", filter);
            self.logging.filter = filter;
        }

        if let Some(val) = lookup(ENV_SYNC_RETRIES) {
            if let Ok(retries) = val.trim().parse() {
                self.sync.retries = retries;
                tracing::debug!("Override sync.retries from env: {}", retries);
            }
        }
    }

    /// Check every section.
    pub fn validate(&self) -> ConfigResult<()> {
        self.validate_data()?;
        self.validate_sync()
    }

    /// Check the reference data location.
    pub fn validate_data(&self) -> ConfigResult<()> {
        if self.data.dir.as_ref().is_some_and(|dir| dir.as_os_str().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "data.dir".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Check values that would make the sync job misbehave.
    pub fn validate_sync(&self) -> ConfigResult<()> {
        if self.sync.retries == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sync.retries".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.sync.upstream_repo.split('/').filter(|s| !s.is_empty()).count() != 2 {
            return Err(ConfigError::InvalidValue {
                field: "sync.upstream_repo".to_string(),
                reason: format!("expected owner/name, got '{}'", self.sync.upstream_repo),
            });
        }

        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/devicemodel/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "devicemodel", "devicemodel")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Reference data location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the reference documents. `None` uses the copy
    /// compiled into the binary.
    pub dir: Option<PathBuf>,
}

/// Upstream synchronization settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Upstream GitHub repository as `owner/name`
    pub upstream_repo: String,
    /// GitHub REST API base URL
    pub api_base: String,
    /// Base URL for raw file downloads
    pub raw_base: String,
    /// User agent sent with every request
    pub user_agent: String,
    /// Attempts per request
    pub retries: u32,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Total request timeout in seconds
    pub max_time_secs: u64,
    /// Directory the normalized documents are written to
    pub output_dir: PathBuf,
    /// Where the Markdown sync report is written
    pub report_path: PathBuf,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            upstream_repo: "kyle-seongwoo-jun/apple-device-identifiers".to_string(),
            api_base: "https://api.github.com".to_string(),
            raw_base: "https://raw.githubusercontent.com".to_string(),
            user_agent: "devicemodel-sync".to_string(),
            retries: 4,
            connect_timeout_secs: 15,
            max_time_secs: 45,
            output_dir: PathBuf::from("crates/devicemodel-catalog/data"),
            report_path: PathBuf::from("sync-report.md"),
        }
    }
}

/// Log filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,devicemodel=debug".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.data.dir.is_none());
        assert_eq!(
            config.sync.upstream_repo,
            "kyle-seongwoo-jun/apple-device-identifiers"
        );
        assert_eq!(config.sync.retries, 4);
        assert_eq!(config.sync.connect_timeout_secs, 15);
        assert_eq!(config.sync.max_time_secs, 45);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
[data]
dir = "/srv/devicemodel"
"#,
        )
        .expect("parse config");

        assert_eq!(config.data.dir, Some(PathBuf::from("/srv/devicemodel")));
        assert_eq!(config.sync, SyncConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[sync]
retries = 2

[logging]
filter = "warn"
"#,
        )
        .expect("write config");

        let loaded = AppConfig::load_from(&path).expect("load config");
        assert_eq!(loaded.sync.retries, 2);
        assert_eq!(loaded.logging.filter, "warn");
        assert_eq!(loaded.data, DataConfig::default());
    }

    #[test]
    fn test_load_from_missing_file() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let result = AppConfig::load_from(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[sync\nretries = ").expect("write config");

        let result = AppConfig::load_from(&path);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_DATA_DIR, "/tmp/identifiers"),
            (ENV_LOG, "debug"),
            (ENV_SYNC_RETRIES, "7"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env(|key| vars.get(key).map(ToString::to_string));

        assert_eq!(config.data.dir, Some(PathBuf::from("/tmp/identifiers")));
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.sync.retries, 7);
    }

    #[test]
    fn test_env_overrides_ignore_blank_and_garbage() {
        let mut config = AppConfig::default();
        config.apply_env(|key| match key {
            ENV_DATA_DIR => Some("  ".to_string()),
            ENV_SYNC_RETRIES => Some("many".to_string()),
            _ => None,
        });

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validate_rejects_zero_retries() {
        let mut config = AppConfig::default();
        config.sync.retries = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_bad_sync_section_leaves_data_valid() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[data]
dir = "/srv/devicemodel"

[sync]
retries = 0
"#,
        )
        .expect("write config");

        let config = AppConfig::load_from(&path).expect("load config");
        assert_eq!(config.data.dir, Some(PathBuf::from("/srv/devicemodel")));
        assert!(config.validate_data().is_ok());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_data_dir() {
        let mut config = AppConfig::default();
        config.data.dir = Some(PathBuf::new());
        assert!(config.validate_data().is_err());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_repo() {
        let mut config = AppConfig::default();
        config.sync.upstream_repo = "apple-device-identifiers".to_string();
        assert!(config.validate().is_err());
    }
}
