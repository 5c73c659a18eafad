//! Promotional image management.
//!
//! Uploads are best-effort: every file gets its own outcome and a failing
//! file never aborts the others.

use chrono::Utc;
use lensbook_core::error::{LensbookError, Result};
use lensbook_core::session::{ImageBlobStore, ImageUpload, SessionImage, SessionImageRepository};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Outcome of one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImageUploadResult {
    Uploaded {
        file_name: String,
        path: String,
        url: String,
    },
    Failed {
        file_name: String,
        error: String,
    },
}

/// Per-file outcomes in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageUploadReport {
    pub results: Vec<ImageUploadResult>,
    pub error_count: usize,
}

impl ImageUploadReport {
    pub fn uploaded(&self) -> impl Iterator<Item = &ImageUploadResult> {
        self.results
            .iter()
            .filter(|r| matches!(r, ImageUploadResult::Uploaded { .. }))
    }
}

pub struct ImageUseCase {
    image_repository: Arc<dyn SessionImageRepository>,
    blob_store: Arc<dyn ImageBlobStore>,
    max_image_bytes: u64,
}

impl ImageUseCase {
    pub fn new(
        image_repository: Arc<dyn SessionImageRepository>,
        blob_store: Arc<dyn ImageBlobStore>,
        max_image_bytes: u64,
    ) -> Self {
        Self {
            image_repository,
            blob_store,
            max_image_bytes,
        }
    }

    /// Stores each file at `{session_id}/{unix_millis}-{n}.{ext}` and records it.
    pub async fn upload_images(&self, session_id: &str, files: Vec<ImageUpload>) -> ImageUploadReport {
        let millis = Utc::now().timestamp_millis();
        let mut report = ImageUploadReport::default();

        for (n, file) in files.into_iter().enumerate() {
            let result = match self.upload_one(session_id, millis, n, &file).await {
                Ok(image) => ImageUploadResult::Uploaded {
                    file_name: file.file_name,
                    path: image.storage_path,
                    url: image.url,
                },
                Err(error) => {
                    tracing::warn!(session_id, file = %file.file_name, error = %error, "Image upload failed");
                    report.error_count += 1;
                    ImageUploadResult::Failed {
                        file_name: file.file_name,
                        error: error.to_string(),
                    }
                }
            };
            report.results.push(result);
        }

        if !report.results.is_empty() {
            tracing::info!(
                session_id,
                uploaded = report.results.len() - report.error_count,
                failed = report.error_count,
                "Uploaded session images"
            );
        }
        report
    }

    async fn upload_one(
        &self,
        session_id: &str,
        millis: i64,
        n: usize,
        file: &ImageUpload,
    ) -> Result<SessionImage> {
        let ext = Path::new(&file.file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .filter(|ext| !ext.is_empty())
            .ok_or_else(|| LensbookError::data_access(format!("'{}' has no file extension", file.file_name)))?;

        if file.bytes.len() as u64 > self.max_image_bytes {
            return Err(LensbookError::data_access(format!(
                "'{}' is {} bytes; the limit is {}",
                file.file_name,
                file.bytes.len(),
                self.max_image_bytes
            )));
        }

        let path = format!("{}/{}-{}.{}", session_id, millis, n, ext);
        let stored = self.blob_store.upload(&path, &file.bytes).await?;

        let image = SessionImage {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            storage_path: stored.path,
            url: stored.url,
            created_at: Utc::now(),
        };

        if let Err(e) = self.image_repository.save(&image).await {
            if let Err(remove_err) = self.blob_store.remove(&image.storage_path).await {
                tracing::warn!(path = %image.storage_path, error = %remove_err, "Failed to remove unrecorded image");
            }
            return Err(e);
        }

        Ok(image)
    }

    /// Images of a session, newest first.
    pub async fn list_images(&self, session_id: &str) -> Result<Vec<SessionImage>> {
        self.image_repository.list_by_session(session_id).await
    }

    /// Deletes the blob, then the record. The record stays if the blob survives.
    pub async fn delete_image(&self, image_id: &str) -> Result<SessionImage> {
        let image = self
            .image_repository
            .find_by_id(image_id)
            .await?
            .ok_or_else(|| LensbookError::not_found("session image", image_id))?;

        self.blob_store.remove(&image.storage_path).await?;
        self.image_repository.delete(&image.id).await?;

        tracing::info!(image_id, session_id = %image.session_id, "Deleted session image");
        Ok(image)
    }
}
