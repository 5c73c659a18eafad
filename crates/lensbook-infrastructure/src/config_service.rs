//! Configuration service implementation.
//!
//! Loads `AppConfig` from `config.toml` and applies environment overrides.
//! A missing file means defaults.

use crate::paths::LensbookPaths;
use crate::storage::AtomicTomlFile;
use lensbook_core::config::AppConfig;
use lensbook_core::error::{LensbookError, Result};
use std::path::{Path, PathBuf};

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "LENSBOOK_CONFIG";
/// Overrides `data_dir`.
pub const DATA_DIR_ENV: &str = "LENSBOOK_DATA_DIR";

/// A loaded configuration with its data directory resolved.
#[derive(Debug, Clone)]
pub struct ConfigService {
    config: AppConfig,
    paths: LensbookPaths,
}

impl ConfigService {
    /// Loads from `LENSBOOK_CONFIG` or the platform config file, then applies
    /// `LENSBOOK_DATA_DIR`. `data_dir_override` beats both.
    pub fn load(data_dir_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => LensbookPaths::config_file().map_err(|e| LensbookError::config(e.to_string()))?,
        };
        let env_data_dir = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);

        Self::from_file(&config_path, data_dir_override.or(env_data_dir))
    }

    /// Loads `path` (defaults when absent). `data_dir_override` replaces the
    /// file's `data_dir`.
    pub fn from_file(path: &Path, data_dir_override: Option<PathBuf>) -> Result<Self> {
        let mut config = AtomicTomlFile::<AppConfig>::new(path.to_path_buf())
            .load()
            .map_err(|e| LensbookError::config(format!("{}: {}", path.display(), e)))?
            .unwrap_or_default();

        if let Some(dir) = data_dir_override {
            config.data_dir = Some(dir);
        }

        Self::from_config(config)
    }

    pub fn from_config(config: AppConfig) -> Result<Self> {
        if config.image_bucket.trim().is_empty() {
            return Err(LensbookError::config("image_bucket must not be empty"));
        }

        let paths = match &config.data_dir {
            Some(dir) => LensbookPaths::new(dir),
            None => LensbookPaths::platform_default().map_err(|e| LensbookError::config(e.to_string()))?,
        };

        tracing::debug!(data_dir = %paths.data_dir().display(), granularity = %config.availability_granularity, "Loaded configuration");
        Ok(Self { config, paths })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn paths(&self) -> &LensbookPaths {
        &self.paths
    }
}
