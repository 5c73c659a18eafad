//! Session use case implementation.
//!
//! `SessionUseCase` runs the create flow end to end:
//!
//! 1. reject an empty owner
//! 2. validate the submission
//! 3. generate slots
//! 4. persist the session and its availability (two-phase, see [`SessionWriter`])
//! 5. upload images best-effort
//!
//! and answers the owner-scoped queries.

use crate::error::CreateSessionError;
use crate::image_usecase::{ImageUploadReport, ImageUseCase};
use crate::session::SessionWriter;
use chrono::Utc;
use lensbook_core::config::AvailabilityGranularity;
use lensbook_core::error::{LensbookError, Result};
use lensbook_core::schedule::{ScheduleValidator, SessionConfig, SessionSubmission, Slot, SlotGenerator};
use lensbook_core::session::{
    Availability, AvailabilityRepository, ImageUpload, Session, SessionRepository,
};
use serde::Serialize;
use std::sync::Arc;

/// A validated configuration with its slots, not yet persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchedulePreview {
    pub config: SessionConfig,
    pub slots: Vec<Slot>,
}

/// Result of a successful create.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedSession {
    pub session: Session,
    pub slot_count: usize,
    pub availability: Vec<Availability>,
    /// Present when images were supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<ImageUploadReport>,
}

pub struct SessionUseCase {
    session_repository: Arc<dyn SessionRepository>,
    availability_repository: Arc<dyn AvailabilityRepository>,
    writer: SessionWriter,
    images: Arc<ImageUseCase>,
    granularity: AvailabilityGranularity,
}

impl SessionUseCase {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        availability_repository: Arc<dyn AvailabilityRepository>,
        images: Arc<ImageUseCase>,
        granularity: AvailabilityGranularity,
    ) -> Self {
        Self {
            writer: SessionWriter::new(session_repository.clone(), availability_repository.clone()),
            session_repository,
            availability_repository,
            images,
            granularity,
        }
    }

    /// Validates and expands a submission without persisting anything.
    pub fn preview(submission: &SessionSubmission) -> std::result::Result<SchedulePreview, CreateSessionError> {
        let config = ScheduleValidator::validate(submission).map_err(CreateSessionError::Invalid)?;
        let slots = SlotGenerator::generate(&config).map_err(CreateSessionError::Schedule)?;
        Ok(SchedulePreview { config, slots })
    }

    /// Creates a session owned by `owner_id`.
    ///
    /// Image failures are reported in [`CreatedSession::images`] and never
    /// undo the session.
    pub async fn create_session(
        &self,
        owner_id: &str,
        submission: &SessionSubmission,
        images: Vec<ImageUpload>,
    ) -> std::result::Result<CreatedSession, CreateSessionError> {
        if owner_id.trim().is_empty() {
            return Err(CreateSessionError::NotAuthenticated);
        }

        let SchedulePreview { config, slots } = Self::preview(submission)?;

        let session = Session::from_config(owner_id, &config, Utc::now());
        let availability = Availability::plan(&session.id, &config, &slots, self.granularity);

        self.writer.write(&session, &availability).await?;
        tracing::info!(
            session_id = %session.id,
            owner_id,
            dates = config.selected_dates.len(),
            slots = slots.len(),
            rows = availability.len(),
            granularity = %self.granularity,
            "Created session"
        );

        let images = if images.is_empty() {
            None
        } else {
            Some(self.images.upload_images(&session.id, images).await)
        };

        Ok(CreatedSession {
            session,
            slot_count: slots.len(),
            availability,
            images,
        })
    }

    /// The owner's sessions, newest first.
    pub async fn list_sessions(&self, owner_id: &str) -> Result<Vec<Session>> {
        Self::require_owner(owner_id)?;
        self.session_repository.list_by_owner(owner_id).await
    }

    /// A session, if `owner_id` owns it.
    pub async fn get_session(&self, owner_id: &str, session_id: &str) -> Result<Session> {
        Self::require_owner(owner_id)?;
        self.session_repository
            .find_by_id(session_id)
            .await?
            .filter(|session| session.owner_id == owner_id)
            .ok_or_else(|| LensbookError::not_found("session", session_id))
    }

    /// Availability of an owned session, ordered by date, start, and spot.
    pub async fn list_availability(&self, owner_id: &str, session_id: &str) -> Result<Vec<Availability>> {
        let session = self.get_session(owner_id, session_id).await?;
        self.availability_repository.list_by_session(&session.id).await
    }

    fn require_owner(owner_id: &str) -> Result<()> {
        if owner_id.trim().is_empty() {
            Err(LensbookError::NotAuthenticated)
        } else {
            Ok(())
        }
    }
}
