//! TOML-based SessionRepository implementation

use crate::dto::SessionV1_0_0;
use crate::paths::LensbookPaths;
use crate::storage::AtomicTomlFile;
use async_trait::async_trait;
use lensbook_core::error::{LensbookError, Result};
use lensbook_core::session::{Session, SessionRepository};
use std::fs;
use std::path::{Path, PathBuf};

/// Stores each session as its own TOML file.
///
/// ```text
/// data_dir/
/// └── sessions/
///     ├── <session-id-1>.toml
///     └── <session-id-2>.toml
/// ```
pub struct TomlSessionRepository {
    sessions_dir: PathBuf,
}

impl TomlSessionRepository {
    /// Creates the repository, creating `sessions/` if needed.
    pub fn new(paths: &LensbookPaths) -> Result<Self> {
        let sessions_dir = paths.sessions_dir();
        fs::create_dir_all(&sessions_dir)
            .map_err(|e| LensbookError::io(format!("Failed to create sessions directory: {}", e)))?;
        Ok(Self { sessions_dir })
    }

    fn file(&self, session_id: &str) -> Option<AtomicTomlFile<SessionV1_0_0>> {
        record_path(&self.sessions_dir, session_id).map(AtomicTomlFile::new)
    }
}

/// `<dir>/<id>.toml`, or `None` for IDs that could escape `dir`.
pub(crate) fn record_path(dir: &Path, id: &str) -> Option<PathBuf> {
    let safe = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    safe.then(|| dir.join(format!("{}.toml", id)))
}

/// TOML files directly under `dir`, skipping temp and lock files.
pub(crate) fn record_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let hidden = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('.'));
        if !hidden && path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[async_trait]
impl SessionRepository for TomlSessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
        let Some(file) = self.file(session_id) else {
            return Ok(None);
        };
        file.load()?.map(Session::try_from).transpose()
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let file = self
            .file(&session.id)
            .ok_or_else(|| LensbookError::data_access(format!("Invalid session id '{}'", session.id)))?;
        file.save(&SessionV1_0_0::from(session))?;
        tracing::debug!(session_id = %session.id, path = %file.path().display(), "Saved session");
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        match self.file(session_id) {
            Some(file) => Ok(file.remove()?),
            None => Ok(()),
        }
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Session>> {
        let mut sessions = Vec::new();

        for path in record_files(&self.sessions_dir)? {
            let loaded = AtomicTomlFile::<SessionV1_0_0>::new(path.clone())
                .load()
                .map_err(LensbookError::from)
                .and_then(|dto| dto.map(Session::try_from).transpose());

            match loaded {
                Ok(Some(session)) if session.owner_id == owner_id => sessions.push(session),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable session file");
                }
            }
        }

        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }
}
