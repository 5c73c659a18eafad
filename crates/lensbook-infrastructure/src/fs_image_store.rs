//! Filesystem-backed image bucket.

use crate::paths::LensbookPaths;
use async_trait::async_trait;
use lensbook_core::error::{LensbookError, Result};
use lensbook_core::session::{ImageBlobStore, StoredObject};
use std::path::{Component, Path, PathBuf};

/// Stores image blobs under `<data_dir>/<bucket>/`.
///
/// URLs are `<public_base_url>/<bucket>/<path>` when a base URL is
/// configured and `file://` URLs otherwise.
pub struct FileSystemImageStore {
    bucket: String,
    root: PathBuf,
    public_base_url: Option<String>,
}

impl FileSystemImageStore {
    pub fn new(paths: &LensbookPaths, bucket: impl Into<String>, public_base_url: Option<String>) -> Self {
        let bucket = bucket.into();
        Self {
            root: paths.bucket_dir(&bucket),
            bucket,
            public_base_url,
        }
    }

    /// Resolves `path` inside the bucket, refusing anything that could escape it.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let contained = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !contained {
            return Err(LensbookError::data_access(format!(
                "Invalid object path '{}'",
                path
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ImageBlobStore for FileSystemImageStore {
    async fn upload(&self, path: &str, bytes: &[u8]) -> Result<StoredObject> {
        let target = self.resolve(path)?;

        let mime = mime_guess::from_path(&target).first_or_octet_stream();
        if mime.type_().as_str() != "image" {
            return Err(LensbookError::data_access(format!(
                "Unsupported image type '{}'",
                mime
            )));
        }

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = target.with_extension("upload.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &target).await?;

        tracing::debug!(bucket = %self.bucket, path, content_type = %mime, size = bytes.len(), "Stored image");

        Ok(StoredObject {
            path: path.to_string(),
            url: self.public_url(path),
        })
    }

    fn public_url(&self, path: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/{}/{}", base.trim_end_matches('/'), self.bucket, path),
            None => format!("file://{}", self.root.join(path).display()),
        }
    }

    async fn remove(&self, path: &str) -> Result<()> {
        let target = self.resolve(path)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
