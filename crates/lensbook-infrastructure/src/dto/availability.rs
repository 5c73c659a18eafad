//! Availability DTOs. All rows of one session share a file.

use super::{check_version, parse_date, parse_time};
use lensbook_core::error::{LensbookError, Result};
use lensbook_core::session::Availability;
use serde::{Deserialize, Serialize};

/// Current schema version for availability files.
pub const AVAILABILITY_VERSION: &str = "1.0.0";

/// One availability row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityV1_0_0 {
    pub id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spot_index: Option<u32>,
}

/// V1.0.0: The rows of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityFileV1_0_0 {
    pub schema_version: String,
    pub session_id: String,
    #[serde(default)]
    pub rows: Vec<AvailabilityV1_0_0>,
}

impl AvailabilityFileV1_0_0 {
    pub fn empty(session_id: &str) -> Self {
        Self {
            schema_version: AVAILABILITY_VERSION.to_string(),
            session_id: session_id.to_string(),
            rows: Vec::new(),
        }
    }

    /// Converts every row back into the domain type.
    pub fn into_domain(self) -> Result<Vec<Availability>> {
        const ENTITY: &str = "availability";
        check_version(ENTITY, &self.schema_version, AVAILABILITY_VERSION)?;

        let session_id = self.session_id;
        self.rows
            .into_iter()
            .map(|row| {
                Ok(Availability {
                    date: parse_date(ENTITY, "date", &row.date)?,
                    start_time: parse_time(ENTITY, "start_time", &row.start_time)?,
                    end_time: parse_time(ENTITY, "end_time", &row.end_time)?,
                    id: row.id,
                    session_id: session_id.clone(),
                    spot_index: row.spot_index,
                })
            })
            .collect::<std::result::Result<Vec<_>, LensbookError>>()
    }
}

impl From<&Availability> for AvailabilityV1_0_0 {
    fn from(row: &Availability) -> Self {
        Self {
            id: row.id.clone(),
            date: row.date.format("%Y-%m-%d").to_string(),
            start_time: row.start_time.to_string(),
            end_time: row.end_time.to_string(),
            spot_index: row.spot_index,
        }
    }
}
