//! Storage collaborator traits.
//!
//! The application layer only sees these traits; concrete backends live in
//! `lensbook-infrastructure`.

use super::model::{Availability, Session, SessionImage, StoredObject};
use crate::error::Result;
use async_trait::async_trait;

/// Persistence for session records.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Finds a session by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: Session found
    /// - `Ok(None)`: Session not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>>;

    /// Saves a session, replacing any record with the same ID.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Deletes a session.
    ///
    /// Succeeds when the session did not exist.
    async fn delete(&self, session_id: &str) -> Result<()>;

    /// All sessions owned by `owner_id`, newest first.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Session>>;
}

/// Persistence for availability rows.
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Writes a batch of rows. Either every row is stored or none is.
    async fn save_all(&self, rows: &[Availability]) -> Result<()>;

    /// Rows for a session ordered by date, start time, and spot.
    async fn list_by_session(&self, session_id: &str) -> Result<Vec<Availability>>;

    /// Removes every row of a session. Succeeds when there were none.
    async fn delete_by_session(&self, session_id: &str) -> Result<()>;
}

/// Persistence for image records.
#[async_trait]
pub trait SessionImageRepository: Send + Sync {
    async fn save(&self, image: &SessionImage) -> Result<()>;

    async fn find_by_id(&self, image_id: &str) -> Result<Option<SessionImage>>;

    /// Images of a session, newest first.
    async fn list_by_session(&self, session_id: &str) -> Result<Vec<SessionImage>>;

    async fn delete(&self, image_id: &str) -> Result<()>;
}

/// Blob storage for image bytes.
#[async_trait]
pub trait ImageBlobStore: Send + Sync {
    /// Stores `bytes` at `path` inside the bucket.
    async fn upload(&self, path: &str, bytes: &[u8]) -> Result<StoredObject>;

    /// Retrievable URL for `path`.
    fn public_url(&self, path: &str) -> String;

    /// Removes the object at `path`. Succeeds when it is already gone.
    async fn remove(&self, path: &str) -> Result<()>;
}
