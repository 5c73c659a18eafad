//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the versioned on-disk schema. They are private to
//! the infrastructure layer; repositories convert to and from domain types
//! at the boundary. Times, dates, and timestamps are stored as strings
//! (`HH:MM`, `YYYY-MM-DD`, RFC 3339) and parsed back on load.
//!
//! ## Schema Versioning (Semantic Versioning)
//!
//! - **MAJOR (X.0.0)**: Breaking changes (field removal, type changes)
//! - **MINOR (1.X.0)**: Backward-compatible additions (new optional fields)
//!
//! ### Version History
//! - Session **1.0.0**: Initial schema
//! - Availability **1.0.0**: Initial schema, one file per session
//! - SessionImage **1.0.0**: Initial schema

mod availability;
mod image;
mod session;

pub use availability::{AvailabilityFileV1_0_0, AvailabilityV1_0_0, AVAILABILITY_VERSION};
pub use image::{SessionImageV1_0_0, SESSION_IMAGE_VERSION};
pub use session::{SessionV1_0_0, SESSION_VERSION};

use chrono::{DateTime, NaiveDate, Utc};
use lensbook_core::error::{LensbookError, Result};
use lensbook_core::schedule::TimeOfDay;

fn corrupt(entity: &str, field: &str, value: &str) -> LensbookError {
    LensbookError::Serialization {
        format: "TOML".to_string(),
        message: format!("{entity}: invalid {field} '{value}'"),
    }
}

pub(crate) fn parse_timestamp(entity: &str, field: &str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| corrupt(entity, field, value))
}

pub(crate) fn parse_time(entity: &str, field: &str, value: &str) -> Result<TimeOfDay> {
    TimeOfDay::parse(value).map_err(|_| corrupt(entity, field, value))
}

pub(crate) fn parse_date(entity: &str, field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| corrupt(entity, field, value))
}

/// Rejects files written by a newer major version.
pub(crate) fn check_version(entity: &str, found: &str, current: &str) -> Result<()> {
    let major = |v: &str| v.split('.').next().map(str::to_string);
    if major(found) == major(current) {
        Ok(())
    } else {
        Err(LensbookError::Serialization {
            format: "TOML".to_string(),
            message: format!("{entity}: unsupported schema version {found} (expected {current})"),
        })
    }
}
