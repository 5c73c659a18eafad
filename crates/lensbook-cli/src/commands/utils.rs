use anyhow::{Context, Result};
use clap::Args;
use lensbook_application::{ImageUseCase, SessionUseCase};
use lensbook_core::schedule::{SessionForm, SessionSubmission};
use lensbook_core::session::ImageUpload;
use lensbook_infrastructure::{
    ConfigService, FileSystemImageStore, TomlAvailabilityRepository, TomlSessionImageRepository,
    TomlSessionRepository,
};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Where a submission comes from.
#[derive(Args, Debug, Clone)]
pub struct SubmissionArgs {
    /// JSON file: a flat form object, or `{"form": {...}, "selectedDates": [...]}`
    #[arg(long)]
    pub form: PathBuf,

    /// Selected date, YYYY-MM-DD (repeatable, added to any dates in the file)
    #[arg(long = "date")]
    pub dates: Vec<String>,
}

impl SubmissionArgs {
    pub fn load(&self) -> Result<SessionSubmission> {
        let content = fs::read_to_string(&self.form)
            .with_context(|| format!("Failed to read {}", self.form.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {} as JSON", self.form.display()))?;

        let mut submission = parse_submission(value)
            .with_context(|| format!("Unexpected form layout in {}", self.form.display()))?;
        submission.selected_dates.extend(self.dates.iter().cloned());
        Ok(submission)
    }
}

fn parse_submission(value: Value) -> Result<SessionSubmission> {
    if value.get("form").is_some() {
        return serde_json::from_value(value).context("Invalid submission object");
    }
    let form = SessionForm::from_value(value).context("Form must be a JSON object")?;
    Ok(SessionSubmission {
        form,
        selected_dates: Vec::new(),
    })
}

/// Reads image files for upload, keeping their file names.
pub fn read_images(paths: &[PathBuf]) -> Result<Vec<ImageUpload>> {
    paths
        .iter()
        .map(|path| {
            let bytes = fs::read(path).with_context(|| format!("Failed to read image {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(ImageUpload { file_name, bytes })
        })
        .collect()
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Composition root: configuration, filesystem adapters, and use cases.
pub struct App {
    pub sessions: SessionUseCase,
    pub images: Arc<ImageUseCase>,
}

impl App {
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self> {
        let config_service = ConfigService::load(data_dir).context("Failed to load configuration")?;
        Self::from_config(&config_service)
    }

    pub fn from_config(config_service: &ConfigService) -> Result<Self> {
        let config = config_service.config();
        let paths = config_service.paths();
        tracing::debug!(data_dir = %paths.data_dir().display(), "Opening data directory");

        let session_repository = Arc::new(
            TomlSessionRepository::new(paths).context("Failed to open session storage")?,
        );
        let availability_repository = Arc::new(
            TomlAvailabilityRepository::new(paths).context("Failed to open availability storage")?,
        );
        let image_repository = Arc::new(
            TomlSessionImageRepository::new(paths).context("Failed to open image storage")?,
        );
        let blob_store = Arc::new(FileSystemImageStore::new(
            paths,
            config.image_bucket.clone(),
            config.public_base_url.clone(),
        ));

        let images = Arc::new(ImageUseCase::new(
            image_repository,
            blob_store,
            config.max_image_bytes,
        ));
        let sessions = SessionUseCase::new(
            session_repository,
            availability_repository,
            images.clone(),
            config.availability_granularity,
        );

        Ok(Self { sessions, images })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lensbook_core::schedule::{Coerced, FormField};
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_flat_form_file_with_date_flags() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("form.json");
        fs::write(&path, json!({"name": "Minis", "duration": 30}).to_string()).unwrap();

        let args = SubmissionArgs {
            form: path,
            dates: vec!["2024-06-01".to_string()],
        };
        let submission = args.load().unwrap();
        assert_eq!(submission.form.number(FormField::Duration), Coerced::Value(30.0));
        assert_eq!(submission.selected_dates, vec!["2024-06-01".to_string()]);
    }

    #[test]
    fn test_wrapped_submission_file_merges_dates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("submission.json");
        fs::write(
            &path,
            json!({"form": {"name": "Minis"}, "selectedDates": ["2024-06-01"]}).to_string(),
        )
        .unwrap();

        let args = SubmissionArgs {
            form: path,
            dates: vec!["2024-06-02".to_string()],
        };
        assert_eq!(args.load().unwrap().selected_dates.len(), 2);
    }

    #[test]
    fn test_non_object_form_is_rejected() {
        assert!(parse_submission(json!(["not", "a", "form"])).is_err());
    }

    #[test]
    fn test_read_images_keeps_file_names() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cover.jpg");
        fs::write(&path, b"jpeg").unwrap();

        let uploads = read_images(&[path]).unwrap();
        assert_eq!(uploads[0].file_name, "cover.jpg");
        assert_eq!(uploads[0].bytes, b"jpeg");
    }
}
