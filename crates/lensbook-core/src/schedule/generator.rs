//! Slot generation.
//!
//! Expands a validated `SessionConfig` into concrete slots. The intra-day
//! pattern is computed once and stamped onto each selected date, so every
//! date carries an identical copy.

use super::model::{ScheduleRules, SessionConfig, Slot};
use super::time::TimeOfDay;
use crate::error::{LensbookError, Result};

/// Start and end of one spot within the daily window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpotTimes {
    pub spot_index: u32,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

/// Expands validated configurations into slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotGenerator;

impl SlotGenerator {
    /// All slots for `config`, ordered by date then spot index.
    ///
    /// Fails with [`LensbookError::ScheduleFault`] if any spot would leave the
    /// daily window. The validator's capacity check makes that unreachable
    /// for validated input, so a failure here is a defect, not a user error.
    pub fn generate(config: &SessionConfig) -> Result<Vec<Slot>> {
        let pattern = Self::day_pattern(&config.schedule)?;

        let slots: Vec<Slot> = config
            .selected_dates
            .iter()
            .flat_map(|&date| {
                pattern.iter().map(move |spot| Slot {
                    date,
                    start_time: spot.start_time,
                    end_time: spot.end_time,
                    spot_index: spot.spot_index,
                })
            })
            .collect();

        tracing::debug!(
            dates = config.selected_dates.len(),
            spots_per_day = pattern.len(),
            slots = slots.len(),
            "Generated slots"
        );

        Ok(slots)
    }

    /// The spots of a single day, in spot-index order.
    pub fn day_pattern(rules: &ScheduleRules) -> Result<Vec<SpotTimes>> {
        (0..rules.number_of_spots)
            .map(|spot_index| Self::spot(rules, spot_index))
            .collect()
    }

    fn spot(rules: &ScheduleRules, spot_index: u32) -> Result<SpotTimes> {
        let duration = u64::from(rules.duration_minutes);
        let start_time = rules
            .daily_start
            .checked_add_minutes(rules.spot_offset(spot_index));
        let end_time = start_time.and_then(|start| start.checked_add_minutes(duration));

        match (start_time, end_time) {
            (Some(start_time), Some(end_time))
                if start_time >= rules.daily_start && end_time <= rules.daily_end =>
            {
                Ok(SpotTimes {
                    spot_index,
                    start_time,
                    end_time,
                })
            }
            _ => {
                tracing::error!(
                    spot_index,
                    daily_start = %rules.daily_start,
                    daily_end = %rules.daily_end,
                    duration_minutes = rules.duration_minutes,
                    gap_minutes = rules.gap_minutes,
                    "Generated spot leaves the daily window; validator and generator disagree"
                );
                Err(LensbookError::schedule_fault(format!(
                    "spot {} of {} does not fit {}-{}",
                    spot_index, rules.number_of_spots, rules.daily_start, rules.daily_end
                )))
            }
        }
    }
}
