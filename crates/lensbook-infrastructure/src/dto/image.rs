//! Session image DTOs.

use super::{check_version, parse_timestamp};
use lensbook_core::error::{LensbookError, Result};
use lensbook_core::session::SessionImage;
use serde::{Deserialize, Serialize};

/// Current schema version for image records.
pub const SESSION_IMAGE_VERSION: &str = "1.0.0";

/// V1.0.0: Initial image record schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionImageV1_0_0 {
    pub schema_version: String,
    pub id: String,
    pub session_id: String,
    pub storage_path: String,
    pub url: String,
    /// RFC 3339
    pub created_at: String,
}

impl From<&SessionImage> for SessionImageV1_0_0 {
    fn from(image: &SessionImage) -> Self {
        Self {
            schema_version: SESSION_IMAGE_VERSION.to_string(),
            id: image.id.clone(),
            session_id: image.session_id.clone(),
            storage_path: image.storage_path.clone(),
            url: image.url.clone(),
            created_at: image.created_at.to_rfc3339(),
        }
    }
}

impl TryFrom<SessionImageV1_0_0> for SessionImage {
    type Error = LensbookError;

    fn try_from(dto: SessionImageV1_0_0) -> Result<Self> {
        const ENTITY: &str = "session image";
        check_version(ENTITY, &dto.schema_version, SESSION_IMAGE_VERSION)?;

        Ok(SessionImage {
            created_at: parse_timestamp(ENTITY, "created_at", &dto.created_at)?,
            id: dto.id,
            session_id: dto.session_id,
            storage_path: dto.storage_path,
            url: dto.url,
        })
    }
}
