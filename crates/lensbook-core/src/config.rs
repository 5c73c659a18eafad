use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum::{Display, EnumString};

/// How availability rows are written for a session.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AvailabilityGranularity {
    /// One row per generated slot (date, spot index).
    #[default]
    PerSpot,
    /// One row per date spanning the whole daily window.
    PerDate,
}

pub const DEFAULT_IMAGE_BUCKET: &str = "session-images";
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

fn default_image_bucket() -> String {
    DEFAULT_IMAGE_BUCKET.to_string()
}

fn default_max_image_bytes() -> u64 {
    DEFAULT_MAX_IMAGE_BYTES
}

/// Root application configuration (`config.toml`).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Where session data and images live. Platform data dir when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub availability_granularity: AvailabilityGranularity,
    #[serde(default = "default_image_bucket")]
    pub image_bucket: String,
    /// Prefix for retrievable image URLs. `file://` URLs when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_base_url: Option<String>,
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            availability_granularity: AvailabilityGranularity::default(),
            image_bucket: default_image_bucket(),
            public_base_url: None,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}
