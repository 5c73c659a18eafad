//! Session DTOs.

use super::{check_version, parse_time, parse_timestamp};
use lensbook_core::error::{LensbookError, Result};
use lensbook_core::session::Session;
use serde::{Deserialize, Serialize};

/// Current schema version for sessions.
pub const SESSION_VERSION: &str = "1.0.0";

/// V1.0.0: Initial session schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionV1_0_0 {
    pub schema_version: String,
    pub id: String,
    pub owner_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub duration_minutes: u32,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit: Option<f64>,
    #[serde(default)]
    pub deposit_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_notes: Option<String>,
    /// `HH:MM`
    pub daily_start: String,
    /// `HH:MM`
    pub daily_end: String,
    pub number_of_spots: u32,
    #[serde(default)]
    pub gap_minutes: u32,
    #[serde(default)]
    pub same_start_time: bool,
    /// RFC 3339
    pub created_at: String,
    /// RFC 3339
    pub updated_at: String,
}

impl From<&Session> for SessionV1_0_0 {
    fn from(session: &Session) -> Self {
        Self {
            schema_version: SESSION_VERSION.to_string(),
            id: session.id.clone(),
            owner_id: session.owner_id.clone(),
            name: session.name.clone(),
            description: session.description.clone(),
            duration_minutes: session.duration_minutes,
            price: session.price,
            deposit: session.deposit,
            deposit_required: session.deposit_required,
            location_name: session.location_name.clone(),
            address: session.address.clone(),
            location_notes: session.location_notes.clone(),
            daily_start: session.daily_start.to_string(),
            daily_end: session.daily_end.to_string(),
            number_of_spots: session.number_of_spots,
            gap_minutes: session.gap_minutes,
            same_start_time: session.same_start_time,
            created_at: session.created_at.to_rfc3339(),
            updated_at: session.updated_at.to_rfc3339(),
        }
    }
}

impl TryFrom<SessionV1_0_0> for Session {
    type Error = LensbookError;

    fn try_from(dto: SessionV1_0_0) -> Result<Self> {
        const ENTITY: &str = "session";
        check_version(ENTITY, &dto.schema_version, SESSION_VERSION)?;

        Ok(Session {
            daily_start: parse_time(ENTITY, "daily_start", &dto.daily_start)?,
            daily_end: parse_time(ENTITY, "daily_end", &dto.daily_end)?,
            created_at: parse_timestamp(ENTITY, "created_at", &dto.created_at)?,
            updated_at: parse_timestamp(ENTITY, "updated_at", &dto.updated_at)?,
            id: dto.id,
            owner_id: dto.owner_id,
            name: dto.name,
            description: dto.description,
            duration_minutes: dto.duration_minutes,
            price: dto.price,
            deposit: dto.deposit,
            deposit_required: dto.deposit_required,
            location_name: dto.location_name,
            address: dto.address,
            location_notes: dto.location_notes,
            number_of_spots: dto.number_of_spots,
            gap_minutes: dto.gap_minutes,
            same_start_time: dto.same_start_time,
        })
    }
}
