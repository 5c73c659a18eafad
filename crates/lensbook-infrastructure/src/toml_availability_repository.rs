//! TOML-based AvailabilityRepository implementation

use crate::dto::{AvailabilityFileV1_0_0, AvailabilityV1_0_0};
use crate::paths::LensbookPaths;
use crate::storage::AtomicTomlFile;
use crate::toml_session_repository::record_path;
use async_trait::async_trait;
use lensbook_core::error::{LensbookError, Result};
use lensbook_core::session::{Availability, AvailabilityRepository};
use std::fs;
use std::path::PathBuf;

/// Stores the availability rows of each session in one TOML file.
///
/// A batch is written with a single atomic rename, so a failed `save_all`
/// leaves the file as it was.
pub struct TomlAvailabilityRepository {
    availability_dir: PathBuf,
}

impl TomlAvailabilityRepository {
    pub fn new(paths: &LensbookPaths) -> Result<Self> {
        let availability_dir = paths.availability_dir();
        fs::create_dir_all(&availability_dir).map_err(|e| {
            LensbookError::io(format!("Failed to create availability directory: {}", e))
        })?;
        Ok(Self { availability_dir })
    }

    fn file(&self, session_id: &str) -> Result<AtomicTomlFile<AvailabilityFileV1_0_0>> {
        record_path(&self.availability_dir, session_id)
            .map(AtomicTomlFile::new)
            .ok_or_else(|| LensbookError::data_access(format!("Invalid session id '{}'", session_id)))
    }
}

#[async_trait]
impl AvailabilityRepository for TomlAvailabilityRepository {
    async fn save_all(&self, rows: &[Availability]) -> Result<()> {
        let Some(first) = rows.first() else {
            return Ok(());
        };
        let session_id = first.session_id.as_str();
        if rows.iter().any(|row| row.session_id != session_id) {
            return Err(LensbookError::data_access(
                "Availability batch spans more than one session",
            ));
        }

        let file = self.file(session_id)?;
        file.update(AvailabilityFileV1_0_0::empty(session_id), |stored| {
            stored.rows.extend(rows.iter().map(AvailabilityV1_0_0::from));
            Ok(())
        })?;

        tracing::debug!(session_id, rows = rows.len(), "Saved availability rows");
        Ok(())
    }

    async fn list_by_session(&self, session_id: &str) -> Result<Vec<Availability>> {
        let Some(path) = record_path(&self.availability_dir, session_id) else {
            return Ok(Vec::new());
        };
        let mut rows = match AtomicTomlFile::<AvailabilityFileV1_0_0>::new(path).load()? {
            Some(stored) => stored.into_domain()?,
            None => Vec::new(),
        };
        rows.sort_by_key(Availability::sort_key);
        Ok(rows)
    }

    async fn delete_by_session(&self, session_id: &str) -> Result<()> {
        match record_path(&self.availability_dir, session_id) {
            Some(path) => Ok(AtomicTomlFile::<AvailabilityFileV1_0_0>::new(path).remove()?),
            None => Ok(()),
        }
    }
}
