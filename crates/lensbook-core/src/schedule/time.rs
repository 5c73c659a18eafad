//! Minute-resolution time-of-day values.
//!
//! All schedule arithmetic happens on a single abstract day: values never wrap
//! past midnight and carry no timezone. The caller decides which local civil
//! time a date's window refers to.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of minutes in one clock day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// `H:MM` or `HH:MM` on a 24-hour clock.
static TIME_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^([01]?\d|2[0-3]):([0-5]\d)$").ok());

/// A time of day with minute resolution (`00:00` ..= `23:59`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    minutes: u16,
}

/// The input did not look like `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid time format (HH:MM).")]
pub struct InvalidTimeFormat;

impl TimeOfDay {
    /// Builds a time from an hour in `0..24` and a minute in `0..60`.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self {
                minutes: u16::from(hour) * 60 + u16::from(minute),
            })
        } else {
            None
        }
    }

    /// Builds a time from minutes since midnight. `None` once the day is over.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        if minutes < MINUTES_PER_DAY {
            u16::try_from(minutes).ok().map(|minutes| Self { minutes })
        } else {
            None
        }
    }

    /// Parses `H:MM` / `HH:MM`.
    pub fn parse(input: &str) -> Result<Self, InvalidTimeFormat> {
        let caps = TIME_PATTERN
            .as_ref()
            .and_then(|re| re.captures(input))
            .ok_or(InvalidTimeFormat)?;
        let hour: u8 = caps[1].parse().map_err(|_| InvalidTimeFormat)?;
        let minute: u8 = caps[2].parse().map_err(|_| InvalidTimeFormat)?;
        Self::new(hour, minute).ok_or(InvalidTimeFormat)
    }

    pub fn hour(self) -> u8 {
        (self.minutes / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.minutes % 60) as u8
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_since_midnight(self) -> u32 {
        u32::from(self.minutes)
    }

    /// Adds minutes without crossing midnight.
    pub fn checked_add_minutes(self, minutes: u64) -> Option<Self> {
        let total = u64::from(self.minutes).checked_add(minutes)?;
        u32::try_from(total).ok().and_then(Self::from_minutes)
    }

    /// Length of the interval `self..later` in minutes, if `later` is strictly later.
    pub fn minutes_until(self, later: TimeOfDay) -> Option<u32> {
        (later.minutes > self.minutes).then(|| u32::from(later.minutes - self.minutes))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = InvalidTimeFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = InvalidTimeFormat;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_one_and_two_digit_hours() {
        assert_eq!(TimeOfDay::parse("09:00").unwrap(), TimeOfDay::new(9, 0).unwrap());
        assert_eq!(TimeOfDay::parse("9:05").unwrap(), TimeOfDay::new(9, 5).unwrap());
        assert_eq!(TimeOfDay::parse("23:59").unwrap().minutes_since_midnight(), 1439);
    }

    #[test]
    fn test_parse_rejects_out_of_range_and_malformed() {
        for input in ["24:00", "12:60", "1200", "12:5", " 12:00", "ab:cd", ""] {
            assert_eq!(TimeOfDay::parse(input), Err(InvalidTimeFormat), "{input}");
        }
    }

    #[test]
    fn test_display_is_zero_padded() {
        assert_eq!(TimeOfDay::parse("7:05").unwrap().to_string(), "07:05");
    }

    #[test]
    fn test_checked_add_never_crosses_midnight() {
        let late = TimeOfDay::new(23, 30).unwrap();
        assert_eq!(late.checked_add_minutes(29), TimeOfDay::new(23, 59));
        assert_eq!(late.checked_add_minutes(30), None);
        assert_eq!(late.checked_add_minutes(u64::MAX), None);
    }

    #[test]
    fn test_minutes_until_requires_strictly_later() {
        let nine = TimeOfDay::new(9, 0).unwrap();
        let ten = TimeOfDay::new(10, 0).unwrap();
        assert_eq!(nine.minutes_until(ten), Some(60));
        assert_eq!(ten.minutes_until(nine), None);
        assert_eq!(nine.minutes_until(nine), None);
    }

    #[test]
    fn test_serde_uses_clock_string() {
        let t = TimeOfDay::new(8, 15).unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"08:15\"");
        let back: TimeOfDay = serde_json::from_str("\"8:15\"").unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<TimeOfDay>("\"25:00\"").is_err());
    }
}
