pub mod config_service;
pub mod dto;
pub mod fs_image_store;
pub mod paths;
pub mod storage;
pub mod toml_availability_repository;
pub mod toml_image_repository;
pub mod toml_session_repository;

pub use crate::config_service::ConfigService;
pub use crate::fs_image_store::FileSystemImageStore;
pub use crate::paths::LensbookPaths;
pub use crate::toml_availability_repository::TomlAvailabilityRepository;
pub use crate::toml_image_repository::TomlSessionImageRepository;
pub use crate::toml_session_repository::TomlSessionRepository;
