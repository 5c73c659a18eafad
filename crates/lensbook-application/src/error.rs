//! Errors of the create-session flow.

use lensbook_core::LensbookError;
use lensbook_core::schedule::SubmissionErrors;
use serde::Serialize;
use strum::Display;
use thiserror::Error;

/// Which write of the two-phase persist failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PersistStage {
    Session,
    Availability,
}

/// What happened to the partially created session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum CleanupOutcome {
    /// Nothing had been written.
    NotNeeded,
    /// The session record was deleted again.
    RolledBack,
    /// Deleting the session failed; it is orphaned.
    Failed(String),
}

impl std::fmt::Display for CleanupOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CleanupOutcome::NotNeeded => write!(f, "no cleanup needed"),
            CleanupOutcome::RolledBack => write!(f, "session rolled back"),
            CleanupOutcome::Failed(e) => write!(f, "cleanup failed: {}", e),
        }
    }
}

#[derive(Debug, Error)]
pub enum CreateSessionError {
    #[error("Invalid submission: {0}")]
    Invalid(SubmissionErrors),

    #[error("Not authenticated")]
    NotAuthenticated,

    /// The generator disagreed with the validator. A defect, not user error.
    #[error("Failed to generate slots: {0}")]
    Schedule(LensbookError),

    #[error("Failed to create session ({stage} write): {message} [{cleanup}]")]
    Storage {
        stage: PersistStage,
        message: String,
        cleanup: CleanupOutcome,
    },
}

impl CreateSessionError {
    pub fn storage(stage: PersistStage, error: LensbookError, cleanup: CleanupOutcome) -> Self {
        Self::Storage {
            stage,
            message: error.to_string(),
            cleanup,
        }
    }

    /// Field and date errors, when the submission itself was the problem.
    pub fn submission_errors(&self) -> Option<&SubmissionErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}
