pub mod error;
pub mod image_usecase;
pub mod session;
pub mod session_usecase;

#[cfg(test)]
mod test_support;

pub use error::{CleanupOutcome, CreateSessionError, PersistStage};
pub use image_usecase::{ImageUploadReport, ImageUploadResult, ImageUseCase};
pub use session_usecase::{CreatedSession, SchedulePreview, SessionUseCase};
