//! TOML-based SessionImageRepository implementation

use crate::dto::SessionImageV1_0_0;
use crate::paths::LensbookPaths;
use crate::storage::AtomicTomlFile;
use crate::toml_session_repository::{record_files, record_path};
use async_trait::async_trait;
use lensbook_core::error::{LensbookError, Result};
use lensbook_core::session::{SessionImage, SessionImageRepository};
use std::fs;
use std::path::PathBuf;

/// One TOML file per image record under `images/`.
pub struct TomlSessionImageRepository {
    images_dir: PathBuf,
}

impl TomlSessionImageRepository {
    pub fn new(paths: &LensbookPaths) -> Result<Self> {
        let images_dir = paths.images_dir();
        fs::create_dir_all(&images_dir)
            .map_err(|e| LensbookError::io(format!("Failed to create images directory: {}", e)))?;
        Ok(Self { images_dir })
    }

    fn file(&self, image_id: &str) -> Option<AtomicTomlFile<SessionImageV1_0_0>> {
        record_path(&self.images_dir, image_id).map(AtomicTomlFile::new)
    }
}

#[async_trait]
impl SessionImageRepository for TomlSessionImageRepository {
    async fn save(&self, image: &SessionImage) -> Result<()> {
        let file = self
            .file(&image.id)
            .ok_or_else(|| LensbookError::data_access(format!("Invalid image id '{}'", image.id)))?;
        Ok(file.save(&SessionImageV1_0_0::from(image))?)
    }

    async fn find_by_id(&self, image_id: &str) -> Result<Option<SessionImage>> {
        let Some(file) = self.file(image_id) else {
            return Ok(None);
        };
        file.load()?.map(SessionImage::try_from).transpose()
    }

    async fn list_by_session(&self, session_id: &str) -> Result<Vec<SessionImage>> {
        let mut images = Vec::new();
        for path in record_files(&self.images_dir)? {
            let loaded = AtomicTomlFile::<SessionImageV1_0_0>::new(path.clone())
                .load()
                .map_err(LensbookError::from)
                .and_then(|dto| dto.map(SessionImage::try_from).transpose());

            match loaded {
                Ok(Some(image)) if image.session_id == session_id => images.push(image),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable image record");
                }
            }
        }

        images.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(images)
    }

    async fn delete(&self, image_id: &str) -> Result<()> {
        match self.file(image_id) {
            Some(file) => Ok(file.remove()?),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn image(id: &str, session_id: &str, age_minutes: i64) -> SessionImage {
        SessionImage {
            id: id.to_string(),
            session_id: session_id.to_string(),
            storage_path: format!("{}/{}.jpg", session_id, id),
            url: format!("file:///images/{}.jpg", id),
            created_at: Utc::now() - Duration::minutes(age_minutes),
        }
    }

    #[tokio::test]
    async fn test_list_is_newest_first_per_session() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlSessionImageRepository::new(&LensbookPaths::new(temp_dir.path())).unwrap();

        repo.save(&image("a", "s-1", 10)).await.unwrap();
        repo.save(&image("b", "s-1", 1)).await.unwrap();
        repo.save(&image("c", "s-2", 0)).await.unwrap();

        let ids: Vec<String> = repo
            .list_by_session("s-1")
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec!["b".to_string(), "a".to_string()]);
    }

    #[tokio::test]
    async fn test_find_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlSessionImageRepository::new(&LensbookPaths::new(temp_dir.path())).unwrap();

        let img = image("a", "s-1", 0);
        repo.save(&img).await.unwrap();
        assert_eq!(
            repo.find_by_id("a").await.unwrap().map(|i| i.storage_path),
            Some(img.storage_path)
        );

        repo.delete("a").await.unwrap();
        assert!(repo.find_by_id("a").await.unwrap().is_none());
    }
}
