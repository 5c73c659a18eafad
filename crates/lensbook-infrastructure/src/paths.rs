//! Unified path management for lensbook files.
//!
//! ```text
//! ~/.config/lensbook/          # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/lensbook/     # Data directory (or `data_dir` from config)
//! ├── sessions/                # One TOML file per session
//! ├── availability/            # One TOML file per session's rows
//! ├── images/                  # One TOML file per image record
//! └── session-images/          # Image bucket (name from config)
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "lensbook";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("Cannot determine the platform {0} directory")]
    PlatformDirNotFound(&'static str),
}

/// Directory layout rooted at one data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LensbookPaths {
    data_dir: PathBuf,
}

impl LensbookPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Layout under the platform data directory.
    pub fn platform_default() -> Result<Self, PathError> {
        Ok(Self::new(Self::default_data_dir()?))
    }

    /// The platform config directory for lensbook (e.g. `~/.config/lensbook/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::PlatformDirNotFound("config"))
    }

    /// Path to `config.toml` in the platform config directory.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// The platform data directory for lensbook (e.g. `~/.local/share/lensbook/`).
    pub fn default_data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::PlatformDirNotFound("data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn sessions_dir(&self) -> PathBuf {
        self.data_dir.join("sessions")
    }

    pub fn availability_dir(&self) -> PathBuf {
        self.data_dir.join("availability")
    }

    pub fn images_dir(&self) -> PathBuf {
        self.data_dir.join("images")
    }

    /// Root of the image bucket called `bucket`.
    pub fn bucket_dir(&self, bucket: &str) -> PathBuf {
        self.data_dir.join(bucket)
    }
}
