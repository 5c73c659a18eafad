//! Session domain model.
//!
//! These are the records handed to the storage collaborators: the session
//! itself, its availability rows, and its promotional images.

use crate::config::AvailabilityGranularity;
use crate::schedule::{SessionConfig, SessionDetails, Slot, TimeOfDay};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted session offering.
///
/// The flattened `SessionConfig` minus the selected dates, which live on as
/// availability rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// UUID v4.
    pub id: String,
    /// The authenticated photographer who owns the session.
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: u32,
    pub price: f64,
    pub deposit: Option<f64>,
    pub deposit_required: bool,
    pub location_name: Option<String>,
    pub address: Option<String>,
    pub location_notes: Option<String>,
    pub daily_start: TimeOfDay,
    pub daily_end: TimeOfDay,
    pub number_of_spots: u32,
    pub gap_minutes: u32,
    pub same_start_time: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Builds a new session record with a fresh id.
    pub fn from_config(owner_id: impl Into<String>, config: &SessionConfig, now: DateTime<Utc>) -> Self {
        let SessionDetails {
            name,
            description,
            price,
            deposit,
            deposit_required,
            location_name,
            address,
            location_notes,
        } = config.details.clone();
        let schedule = config.schedule;

        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            name,
            description,
            duration_minutes: schedule.duration_minutes,
            price,
            deposit,
            deposit_required,
            location_name,
            address,
            location_notes,
            daily_start: schedule.daily_start,
            daily_end: schedule.daily_end,
            number_of_spots: schedule.number_of_spots,
            gap_minutes: schedule.gap_minutes,
            same_start_time: schedule.same_start_time,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One availability row for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub id: String,
    pub session_id: String,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    /// Absent for per-date rows.
    pub spot_index: Option<u32>,
}

impl Availability {
    /// Rows to persist for `session_id`, shaped by `granularity`.
    ///
    /// Per-spot rows mirror `slots` one to one. Per-date rows carry the whole
    /// daily window, one per selected date.
    pub fn plan(
        session_id: &str,
        config: &SessionConfig,
        slots: &[Slot],
        granularity: AvailabilityGranularity,
    ) -> Vec<Availability> {
        match granularity {
            AvailabilityGranularity::PerSpot => slots
                .iter()
                .map(|slot| Availability {
                    id: Uuid::new_v4().to_string(),
                    session_id: session_id.to_string(),
                    date: slot.date,
                    start_time: slot.start_time,
                    end_time: slot.end_time,
                    spot_index: Some(slot.spot_index),
                })
                .collect(),
            AvailabilityGranularity::PerDate => config
                .selected_dates
                .iter()
                .map(|&date| Availability {
                    id: Uuid::new_v4().to_string(),
                    session_id: session_id.to_string(),
                    date,
                    start_time: config.schedule.daily_start,
                    end_time: config.schedule.daily_end,
                    spot_index: None,
                })
                .collect(),
        }
    }

    /// Sort key: date, start, spot.
    pub fn sort_key(&self) -> (NaiveDate, TimeOfDay, Option<u32>) {
        (self.date, self.start_time, self.spot_index)
    }
}

/// A stored promotional image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionImage {
    pub id: String,
    pub session_id: String,
    /// Path inside the image bucket.
    pub storage_path: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// An image payload supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original file name; its extension is kept.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Where a blob landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    pub path: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{FormField, ScheduleValidator, SessionForm, SessionSubmission, SlotGenerator};

    fn config() -> SessionConfig {
        ScheduleValidator::validate(&SessionSubmission {
            form: SessionForm::new()
                .with(FormField::Name, "Minis")
                .with(FormField::Duration, "30")
                .with(FormField::Price, "80")
                .with(FormField::StartTime, "09:00")
                .with(FormField::EndTime, "11:00")
                .with(FormField::NumberOfSpots, "3")
                .with(FormField::GapBetweenSlots, "5"),
            selected_dates: vec!["2024-06-01".into(), "2024-06-08".into()],
        })
        .unwrap()
    }

    #[test]
    fn test_session_from_config_flattens_schedule() {
        let cfg = config();
        let session = Session::from_config("owner-1", &cfg, Utc::now());
        assert_eq!(session.owner_id, "owner-1");
        assert_eq!(session.daily_start, cfg.schedule.daily_start);
        assert_eq!(session.daily_end, cfg.schedule.daily_end);
        assert_eq!(session.number_of_spots, cfg.schedule.number_of_spots);
        assert_eq!(session.gap_minutes, cfg.schedule.gap_minutes);
        assert!(Uuid::parse_str(&session.id).is_ok());
    }

    #[test]
    fn test_per_spot_plan_mirrors_slots() {
        let cfg = config();
        let slots = SlotGenerator::generate(&cfg).unwrap();
        let rows = Availability::plan("s-1", &cfg, &slots, AvailabilityGranularity::PerSpot);
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().zip(&slots).all(|(row, slot)| {
            row.date == slot.date
                && row.start_time == slot.start_time
                && row.end_time == slot.end_time
                && row.spot_index == Some(slot.spot_index)
        }));
    }

    #[test]
    fn test_per_date_plan_uses_whole_window() {
        let cfg = config();
        let slots = SlotGenerator::generate(&cfg).unwrap();
        let rows = Availability::plan("s-1", &cfg, &slots, AvailabilityGranularity::PerDate);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.start_time.to_string() == "09:00"
            && r.end_time.to_string() == "11:00"
            && r.spot_index.is_none()
            && r.session_id == "s-1"));
    }
}
