//! Two-phase persist of a session and its availability.
//!
//! Phase one writes the session record, phase two the availability batch.
//! No transaction spans both stores, so a phase-two failure is answered by
//! the rollback action: deleting any availability rows a partial batch left
//! behind, then the session record written in phase one.

use crate::error::{CleanupOutcome, CreateSessionError, PersistStage};
use lensbook_core::session::{Availability, AvailabilityRepository, Session, SessionRepository};
use std::sync::Arc;

pub struct SessionWriter {
    session_repository: Arc<dyn SessionRepository>,
    availability_repository: Arc<dyn AvailabilityRepository>,
}

impl SessionWriter {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        availability_repository: Arc<dyn AvailabilityRepository>,
    ) -> Self {
        Self {
            session_repository,
            availability_repository,
        }
    }

    /// Writes both phases, rolling back phase one if phase two fails.
    pub async fn write(&self, session: &Session, rows: &[Availability]) -> Result<(), CreateSessionError> {
        if let Err(e) = self.session_repository.save(session).await {
            tracing::warn!(session_id = %session.id, error = %e, "Session write failed");
            return Err(CreateSessionError::storage(
                PersistStage::Session,
                e,
                CleanupOutcome::NotNeeded,
            ));
        }

        if let Err(e) = self.availability_repository.save_all(rows).await {
            tracing::warn!(
                session_id = %session.id,
                rows = rows.len(),
                error = %e,
                "Availability write failed; deleting session"
            );
            let cleanup = self.rollback(&session.id).await;
            return Err(CreateSessionError::storage(PersistStage::Availability, e, cleanup));
        }

        Ok(())
    }

    async fn rollback(&self, session_id: &str) -> CleanupOutcome {
        let mut failures = Vec::new();

        if let Err(e) = self.availability_repository.delete_by_session(session_id).await {
            tracing::error!(session_id, error = %e, "Failed to delete partial availability");
            failures.push(format!("availability: {}", e));
        }

        if let Err(e) = self.session_repository.delete(session_id).await {
            tracing::error!(session_id, error = %e, "Rollback failed; session record is orphaned");
            failures.push(format!("session: {}", e));
        }

        if failures.is_empty() {
            tracing::warn!(session_id, "Rolled back session after failed availability write");
            CleanupOutcome::RolledBack
        } else {
            CleanupOutcome::Failed(failures.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockAvailabilityRepository, MockSessionRepository, valid_submission};
    use chrono::Utc;
    use lensbook_core::config::AvailabilityGranularity;
    use lensbook_core::schedule::{ScheduleValidator, SlotGenerator};
    use std::sync::atomic::Ordering;

    fn fixture() -> (Session, Vec<Availability>) {
        let config = ScheduleValidator::validate(&valid_submission()).unwrap();
        let slots = SlotGenerator::generate(&config).unwrap();
        let session = Session::from_config("owner-1", &config, Utc::now());
        let rows = Availability::plan(&session.id, &config, &slots, AvailabilityGranularity::PerSpot);
        (session, rows)
    }

    fn writer(
        sessions: &Arc<MockSessionRepository>,
        availability: &Arc<MockAvailabilityRepository>,
    ) -> SessionWriter {
        SessionWriter::new(sessions.clone(), availability.clone())
    }

    #[tokio::test]
    async fn test_both_phases_written() {
        let sessions = Arc::new(MockSessionRepository::default());
        let availability = Arc::new(MockAvailabilityRepository::default());
        let (session, rows) = fixture();

        writer(&sessions, &availability).write(&session, &rows).await.unwrap();

        assert!(sessions.sessions.lock().unwrap().contains_key(&session.id));
        assert_eq!(availability.rows.lock().unwrap().len(), rows.len());
    }

    #[tokio::test]
    async fn test_phase_one_failure_needs_no_cleanup() {
        let sessions = Arc::new(MockSessionRepository::default());
        sessions.fail_save.store(true, Ordering::SeqCst);
        let availability = Arc::new(MockAvailabilityRepository::default());
        let (session, rows) = fixture();

        let err = writer(&sessions, &availability).write(&session, &rows).await.unwrap_err();
        assert!(matches!(
            err,
            CreateSessionError::Storage {
                stage: PersistStage::Session,
                cleanup: CleanupOutcome::NotNeeded,
                ..
            }
        ));
        assert!(availability.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_phase_two_failure_rolls_back_session() {
        let sessions = Arc::new(MockSessionRepository::default());
        let availability = Arc::new(MockAvailabilityRepository::default());
        availability.fail_save.store(true, Ordering::SeqCst);
        let (session, rows) = fixture();

        let err = writer(&sessions, &availability).write(&session, &rows).await.unwrap_err();
        assert!(matches!(
            err,
            CreateSessionError::Storage {
                stage: PersistStage::Availability,
                cleanup: CleanupOutcome::RolledBack,
                ..
            }
        ));
        assert!(sessions.sessions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_rollback_is_reported() {
        let sessions = Arc::new(MockSessionRepository::default());
        sessions.fail_delete.store(true, Ordering::SeqCst);
        let availability = Arc::new(MockAvailabilityRepository::default());
        availability.fail_save.store(true, Ordering::SeqCst);
        let (session, rows) = fixture();

        let err = writer(&sessions, &availability).write(&session, &rows).await.unwrap_err();
        match err {
            CreateSessionError::Storage { cleanup: CleanupOutcome::Failed(message), .. } => {
                assert!(message.contains("session: ") && message.contains("delete rejected"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(sessions.sessions.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rollback_removes_partially_written_rows() {
        let sessions = Arc::new(MockSessionRepository::default());
        let availability = Arc::new(MockAvailabilityRepository::default());
        availability.fail_after_write.store(true, Ordering::SeqCst);
        let (session, rows) = fixture();

        let err = writer(&sessions, &availability).write(&session, &rows).await.unwrap_err();
        assert!(matches!(
            err,
            CreateSessionError::Storage {
                stage: PersistStage::Availability,
                cleanup: CleanupOutcome::RolledBack,
                ..
            }
        ));
        assert!(sessions.sessions.lock().unwrap().is_empty());
        assert!(availability.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_row_cleanup_still_deletes_session() {
        let sessions = Arc::new(MockSessionRepository::default());
        let availability = Arc::new(MockAvailabilityRepository::default());
        availability.fail_after_write.store(true, Ordering::SeqCst);
        availability.fail_delete.store(true, Ordering::SeqCst);
        let (session, rows) = fixture();

        let err = writer(&sessions, &availability).write(&session, &rows).await.unwrap_err();
        match err {
            CreateSessionError::Storage { cleanup: CleanupOutcome::Failed(message), .. } => {
                assert!(message.starts_with("availability:"));
                assert!(!message.contains("session:"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(sessions.sessions.lock().unwrap().is_empty());
        assert_eq!(availability.rows.lock().unwrap().len(), rows.len());
    }
}
