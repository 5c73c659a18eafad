//! In-memory collaborators with switchable failures.

use async_trait::async_trait;
use lensbook_core::error::{LensbookError, Result};
use lensbook_core::schedule::{FormField, SessionForm, SessionSubmission};
use lensbook_core::session::{
    Availability, AvailabilityRepository, ImageBlobStore, Session, SessionImage,
    SessionImageRepository, SessionRepository, StoredObject,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

// Mock SessionRepository for testing
#[derive(Default)]
pub struct MockSessionRepository {
    pub sessions: Mutex<HashMap<String, Session>>,
    pub fail_save: AtomicBool,
    pub fail_delete: AtomicBool,
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.lock().unwrap().get(session_id).cloned())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(LensbookError::data_access("session table unavailable"));
        }
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(LensbookError::data_access("delete rejected"));
        }
        self.sessions.lock().unwrap().remove(session_id);
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Session>> {
        let mut sessions: Vec<Session> = self
            .sessions
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }
}

// Mock AvailabilityRepository for testing
#[derive(Default)]
pub struct MockAvailabilityRepository {
    pub rows: Mutex<Vec<Availability>>,
    pub fail_save: AtomicBool,
    /// Stores the batch, then reports failure, like a non-atomic backend.
    pub fail_after_write: AtomicBool,
    pub fail_delete: AtomicBool,
}

#[async_trait]
impl AvailabilityRepository for MockAvailabilityRepository {
    async fn save_all(&self, rows: &[Availability]) -> Result<()> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(LensbookError::data_access("availability table unavailable"));
        }
        self.rows.lock().unwrap().extend_from_slice(rows);
        if self.fail_after_write.load(Ordering::SeqCst) {
            return Err(LensbookError::data_access("connection lost mid-batch"));
        }
        Ok(())
    }

    async fn list_by_session(&self, session_id: &str) -> Result<Vec<Availability>> {
        let mut rows: Vec<Availability> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.session_id == session_id)
            .cloned()
            .collect();
        rows.sort_by_key(Availability::sort_key);
        Ok(rows)
    }

    async fn delete_by_session(&self, session_id: &str) -> Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(LensbookError::data_access("availability delete rejected"));
        }
        self.rows.lock().unwrap().retain(|r| r.session_id != session_id);
        Ok(())
    }
}

// Mock SessionImageRepository for testing
#[derive(Default)]
pub struct MockImageRepository {
    pub images: Mutex<HashMap<String, SessionImage>>,
    pub fail_save: AtomicBool,
}

#[async_trait]
impl SessionImageRepository for MockImageRepository {
    async fn save(&self, image: &SessionImage) -> Result<()> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(LensbookError::data_access("image table unavailable"));
        }
        self.images
            .lock()
            .unwrap()
            .insert(image.id.clone(), image.clone());
        Ok(())
    }

    async fn find_by_id(&self, image_id: &str) -> Result<Option<SessionImage>> {
        Ok(self.images.lock().unwrap().get(image_id).cloned())
    }

    async fn list_by_session(&self, session_id: &str) -> Result<Vec<SessionImage>> {
        let mut images: Vec<SessionImage> = self
            .images
            .lock()
            .unwrap()
            .values()
            .filter(|i| i.session_id == session_id)
            .cloned()
            .collect();
        images.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(images)
    }

    async fn delete(&self, image_id: &str) -> Result<()> {
        self.images.lock().unwrap().remove(image_id);
        Ok(())
    }
}

// Mock ImageBlobStore for testing
#[derive(Default)]
pub struct MockBlobStore {
    pub objects: Mutex<HashMap<String, Vec<u8>>>,
    /// Uploads whose path ends with this suffix fail.
    pub fail_suffix: Mutex<Option<String>>,
    pub fail_remove: AtomicBool,
}

#[async_trait]
impl ImageBlobStore for MockBlobStore {
    async fn upload(&self, path: &str, bytes: &[u8]) -> Result<StoredObject> {
        let failing = self
            .fail_suffix
            .lock()
            .unwrap()
            .as_deref()
            .is_some_and(|suffix| path.ends_with(suffix));
        if failing {
            return Err(LensbookError::io("bucket rejected upload"));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(path.to_string(), bytes.to_vec());
        Ok(StoredObject {
            path: path.to_string(),
            url: self.public_url(path),
        })
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://cdn.test/session-images/{}", path)
    }

    async fn remove(&self, path: &str) -> Result<()> {
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(LensbookError::io("bucket rejected removal"));
        }
        self.objects.lock().unwrap().remove(path);
        Ok(())
    }
}

/// A valid submission: 2 spots of 30 minutes with a 10 minute gap on two dates.
pub fn valid_submission() -> SessionSubmission {
    SessionSubmission {
        form: SessionForm::new()
            .with(FormField::Name, "Spring Minis")
            .with(FormField::Duration, "30")
            .with(FormField::Price, "150")
            .with(FormField::StartTime, "09:00")
            .with(FormField::EndTime, "10:10")
            .with(FormField::NumberOfSpots, "2")
            .with(FormField::GapBetweenSlots, "10"),
        selected_dates: vec!["2024-06-08".to_string(), "2024-06-01".to_string()],
    }
}
