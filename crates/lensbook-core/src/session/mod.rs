//! Session records and their storage contracts.

mod model;
mod repository;

pub use model::{Availability, ImageUpload, Session, SessionImage, StoredObject};
pub use repository::{
    AvailabilityRepository, ImageBlobStore, SessionImageRepository, SessionRepository,
};
