//! Schedule domain model.
//!
//! `SessionConfig` is the validated, immutable description of a recurring
//! session offering. `Slot` is one concrete bookable interval derived from it.

use super::time::TimeOfDay;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Descriptive and commercial terms of a session.
///
/// None of these take part in slot arithmetic; they are validated together
/// with the schedule so the form reports every problem in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetails {
    pub name: String,
    pub description: Option<String>,
    /// Strictly positive.
    pub price: f64,
    /// Non-negative when present.
    pub deposit: Option<f64>,
    pub deposit_required: bool,
    pub location_name: Option<String>,
    pub address: Option<String>,
    pub location_notes: Option<String>,
}

/// The intra-day pattern that every selected date repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRules {
    pub duration_minutes: u32,
    pub daily_start: TimeOfDay,
    pub daily_end: TimeOfDay,
    pub number_of_spots: u32,
    pub gap_minutes: u32,
    /// Concurrent mode: every spot starts at `daily_start`.
    pub same_start_time: bool,
}

impl ScheduleRules {
    /// Length of the daily window in minutes, `None` unless end is strictly after start.
    pub fn window_minutes(&self) -> Option<u32> {
        self.daily_start.minutes_until(self.daily_end)
    }

    /// Minutes the window must hold for every spot to fit.
    ///
    /// Sequential: `duration * spots + gap * (spots - 1)`.
    /// Concurrent: `duration`.
    pub fn required_minutes(&self) -> u64 {
        let duration = u64::from(self.duration_minutes);
        if self.same_start_time {
            return duration;
        }
        let spots = u64::from(self.number_of_spots);
        let gaps = spots.saturating_sub(1);
        duration
            .saturating_mul(spots)
            .saturating_add(u64::from(self.gap_minutes).saturating_mul(gaps))
    }

    /// Whether the window can hold all spots.
    pub fn fits_window(&self) -> bool {
        self.window_minutes()
            .is_some_and(|window| u64::from(window) >= self.required_minutes())
    }

    /// Offset from `daily_start` at which spot `index` begins.
    pub fn spot_offset(&self, index: u32) -> u64 {
        if self.same_start_time {
            0
        } else {
            let stride = u64::from(self.duration_minutes) + u64::from(self.gap_minutes);
            u64::from(index).saturating_mul(stride)
        }
    }
}

/// The fields of the session form, validated and coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFields {
    pub details: SessionDetails,
    pub schedule: ScheduleRules,
}

/// A fully validated session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    pub details: SessionDetails,
    pub schedule: ScheduleRules,
    /// Never empty once validated. Iterates in ascending calendar order.
    pub selected_dates: BTreeSet<NaiveDate>,
}

impl SessionConfig {
    pub fn new(fields: SessionFields, selected_dates: BTreeSet<NaiveDate>) -> Self {
        Self {
            details: fields.details,
            schedule: fields.schedule,
            selected_dates,
        }
    }
}

/// One concrete bookable interval on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    /// `0..number_of_spots`; distinguishes spots on the same date.
    pub spot_index: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(duration: u32, start: &str, end: &str, spots: u32, gap: u32, same: bool) -> ScheduleRules {
        ScheduleRules {
            duration_minutes: duration,
            daily_start: TimeOfDay::parse(start).unwrap(),
            daily_end: TimeOfDay::parse(end).unwrap(),
            number_of_spots: spots,
            gap_minutes: gap,
            same_start_time: same,
        }
    }

    #[test]
    fn test_required_minutes_sequential_counts_gaps_between_spots_only() {
        assert_eq!(rules(30, "09:00", "10:00", 2, 10, false).required_minutes(), 70);
        assert_eq!(rules(30, "09:00", "10:00", 1, 10, false).required_minutes(), 30);
    }

    #[test]
    fn test_required_minutes_concurrent_is_one_duration() {
        assert_eq!(rules(60, "09:00", "10:00", 3, 15, true).required_minutes(), 60);
    }

    #[test]
    fn test_fits_window_boundary() {
        assert!(rules(30, "09:00", "10:00", 2, 0, false).fits_window());
        assert!(!rules(30, "09:00", "10:00", 2, 1, false).fits_window());
        assert!(!rules(30, "10:00", "09:00", 1, 0, false).fits_window());
    }

    #[test]
    fn test_spot_offset() {
        let sequential = rules(30, "09:00", "12:00", 3, 15, false);
        assert_eq!(sequential.spot_offset(0), 0);
        assert_eq!(sequential.spot_offset(2), 90);
        let concurrent = ScheduleRules { same_start_time: true, ..sequential };
        assert_eq!(concurrent.spot_offset(2), 0);
    }
}
