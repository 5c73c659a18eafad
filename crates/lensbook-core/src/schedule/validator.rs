//! Session form validation.
//!
//! Every per-field rule is checked independently and reported together.
//! Cross-field rules only run once the fields they read are individually valid,
//! so a malformed time never produces a second, misleading ordering error.

use super::form::{
    Coerced, FieldError, FormField, SelectionError, SessionForm, SessionSubmission,
    SubmissionErrors,
};
use super::model::{ScheduleRules, SessionConfig, SessionDetails, SessionFields};
use super::time::TimeOfDay;
use chrono::NaiveDate;
use std::collections::BTreeSet;

pub const NAME_TOO_SHORT: &str = "Session name must be at least 2 characters.";
pub const EXPECTED_STRING: &str = "Expected a string.";
pub const DURATION_NOT_WHOLE: &str = "Duration must be a whole number.";
pub const DURATION_NOT_POSITIVE: &str = "Duration must be positive.";
pub const PRICE_NOT_POSITIVE: &str = "Price must be positive.";
pub const DEPOSIT_NEGATIVE: &str = "Deposit cannot be negative.";
pub const INVALID_TIME: &str = "Invalid time format (HH:MM).";
pub const END_BEFORE_START: &str = "End time must be after start time.";
pub const NOT_ENOUGH_TIME: &str = "Not enough time for all spots with specified duration and gaps.";
pub const SPOTS_NOT_WHOLE: &str = "Number of spots must be a whole number.";
pub const SPOTS_NOT_POSITIVE: &str = "Number of spots must be positive.";
pub const GAP_NOT_WHOLE: &str = "Gap between slots must be a whole number.";
pub const GAP_NEGATIVE: &str = "Gap between slots cannot be negative.";
pub const EXPECTED_NUMBER: &str = "Expected a number.";
pub const EXPECTED_BOOLEAN: &str = "Expected true or false.";
pub const TOO_LARGE: &str = "Value is too large.";

const DEFAULT_NUMBER_OF_SPOTS: u32 = 1;
const DEFAULT_GAP_MINUTES: u32 = 0;
const MIN_NAME_CHARS: usize = 2;

/// Decides whether a submission describes a realisable slot schedule.
///
/// Pure: no I/O, no shared state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleValidator;

impl ScheduleValidator {
    /// Validates the form and the date selection, reporting every problem at once.
    pub fn validate(submission: &SessionSubmission) -> Result<SessionConfig, SubmissionErrors> {
        let fields = Self::validate_fields(&submission.form);
        let dates = Self::validate_dates(&submission.selected_dates);

        match (fields, dates) {
            (Ok(fields), Ok(dates)) => Ok(SessionConfig::new(fields, dates)),
            (fields, dates) => Err(SubmissionErrors {
                field_errors: fields.err().unwrap_or_default(),
                selection: dates.err(),
            }),
        }
    }

    /// Schema-level validation of the text fields.
    pub fn validate_fields(form: &SessionForm) -> Result<SessionFields, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = match form.string(FormField::Name) {
            Coerced::Value(n) if n.chars().count() >= MIN_NAME_CHARS => Some(n),
            Coerced::Value(_) | Coerced::Missing => {
                errors.push(FieldError::new(FormField::Name, NAME_TOO_SHORT));
                None
            }
            Coerced::Invalid => {
                errors.push(FieldError::new(FormField::Name, EXPECTED_STRING));
                None
            }
        };

        let duration = positive_integer(
            form.number(FormField::Duration),
            FormField::Duration,
            DURATION_NOT_WHOLE,
            DURATION_NOT_POSITIVE,
            &mut errors,
        );

        let price = match form.number(FormField::Price) {
            Coerced::Value(p) if p > 0.0 => Some(p),
            Coerced::Value(_) => {
                errors.push(FieldError::new(FormField::Price, PRICE_NOT_POSITIVE));
                None
            }
            Coerced::Missing | Coerced::Invalid => {
                errors.push(FieldError::new(FormField::Price, EXPECTED_NUMBER));
                None
            }
        };

        let deposit = match form.number(FormField::Deposit) {
            Coerced::Missing => Some(None),
            Coerced::Value(d) if d >= 0.0 => Some(Some(d)),
            Coerced::Value(_) => {
                errors.push(FieldError::new(FormField::Deposit, DEPOSIT_NEGATIVE));
                None
            }
            Coerced::Invalid => {
                errors.push(FieldError::new(FormField::Deposit, EXPECTED_NUMBER));
                None
            }
        };

        let deposit_required = flag(form, FormField::DepositRequired, &mut errors);

        let start = clock_time(form, FormField::StartTime, &mut errors);
        let end = clock_time(form, FormField::EndTime, &mut errors);

        let spots = positive_integer(
            form.number(FormField::NumberOfSpots)
                .or_default_value(f64::from(DEFAULT_NUMBER_OF_SPOTS)),
            FormField::NumberOfSpots,
            SPOTS_NOT_WHOLE,
            SPOTS_NOT_POSITIVE,
            &mut errors,
        );

        let gap = non_negative_integer(
            form.number(FormField::GapBetweenSlots)
                .or_default_value(f64::from(DEFAULT_GAP_MINUTES)),
            FormField::GapBetweenSlots,
            &mut errors,
        );

        let same_start_time = flag(form, FormField::SameStartTime, &mut errors);

        // Cross-field: ordering, then capacity.
        let mut schedule = None;
        if let (Some(start), Some(end)) = (start, end) {
            if end <= start {
                errors.push(FieldError::new(FormField::EndTime, END_BEFORE_START));
            } else if let (Some(duration), Some(spots), Some(gap), Some(same_start_time)) =
                (duration, spots, gap, same_start_time)
            {
                let rules = ScheduleRules {
                    duration_minutes: duration,
                    daily_start: start,
                    daily_end: end,
                    number_of_spots: spots,
                    gap_minutes: gap,
                    same_start_time,
                };
                match Self::check_capacity(&rules) {
                    Ok(()) => schedule = Some(rules),
                    Err(e) => errors.push(e),
                }
            }
        }

        match (name, price, deposit, deposit_required, schedule) {
            (Some(name), Some(price), Some(deposit), Some(deposit_required), Some(schedule))
                if errors.is_empty() =>
            {
                Ok(SessionFields {
                    details: SessionDetails {
                        name,
                        description: form.text(FormField::Description),
                        price,
                        deposit,
                        deposit_required,
                        location_name: form.text(FormField::LocationName),
                        address: form.text(FormField::Address),
                        location_notes: form.text(FormField::LocationNotes),
                    },
                    schedule,
                })
            }
            _ => Err(errors),
        }
    }

    /// The daily window must hold every spot. Reported on `numberOfSpots`.
    pub fn check_capacity(rules: &ScheduleRules) -> Result<(), FieldError> {
        if rules.fits_window() {
            Ok(())
        } else {
            Err(FieldError::new(FormField::NumberOfSpots, NOT_ENOUGH_TIME))
        }
    }

    /// Parses the date picker's `YYYY-MM-DD` strings into a non-empty set.
    pub fn validate_dates(raw: &[String]) -> Result<BTreeSet<NaiveDate>, SelectionError> {
        if raw.iter().all(|d| d.trim().is_empty()) {
            return Err(SelectionError::Missing);
        }

        let mut dates = BTreeSet::new();
        let mut invalid = Vec::new();
        for value in raw.iter().map(|d| d.trim()).filter(|d| !d.is_empty()) {
            match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
                Ok(date) => {
                    dates.insert(date);
                }
                Err(_) => invalid.push(value.to_string()),
            }
        }

        if invalid.is_empty() {
            Ok(dates)
        } else {
            Err(SelectionError::InvalidDates(invalid))
        }
    }
}

fn positive_integer(
    value: Coerced<f64>,
    field: FormField,
    not_whole: &str,
    not_positive: &str,
    errors: &mut Vec<FieldError>,
) -> Option<u32> {
    let n = match value {
        Coerced::Value(n) => n,
        Coerced::Missing | Coerced::Invalid => {
            errors.push(FieldError::new(field, EXPECTED_NUMBER));
            return None;
        }
    };
    if n.fract() != 0.0 {
        errors.push(FieldError::new(field, not_whole));
        None
    } else if n <= 0.0 {
        errors.push(FieldError::new(field, not_positive));
        None
    } else if n > f64::from(u32::MAX) {
        errors.push(FieldError::new(field, TOO_LARGE));
        None
    } else {
        Some(n as u32)
    }
}

fn non_negative_integer(
    value: Coerced<f64>,
    field: FormField,
    errors: &mut Vec<FieldError>,
) -> Option<u32> {
    let n = match value {
        Coerced::Value(n) => n,
        Coerced::Missing | Coerced::Invalid => {
            errors.push(FieldError::new(field, EXPECTED_NUMBER));
            return None;
        }
    };
    if n.fract() != 0.0 {
        errors.push(FieldError::new(field, GAP_NOT_WHOLE));
        None
    } else if n < 0.0 {
        errors.push(FieldError::new(field, GAP_NEGATIVE));
        None
    } else if n > f64::from(u32::MAX) {
        errors.push(FieldError::new(field, TOO_LARGE));
        None
    } else {
        Some(n as u32)
    }
}

fn flag(form: &SessionForm, field: FormField, errors: &mut Vec<FieldError>) -> Option<bool> {
    match form.boolean(field).or_default_value(false) {
        Coerced::Value(b) => Some(b),
        Coerced::Missing | Coerced::Invalid => {
            errors.push(FieldError::new(field, EXPECTED_BOOLEAN));
            None
        }
    }
}

fn clock_time(
    form: &SessionForm,
    field: FormField,
    errors: &mut Vec<FieldError>,
) -> Option<TimeOfDay> {
    match form.text(field).map(|t| TimeOfDay::parse(&t)) {
        Some(Ok(time)) => Some(time),
        Some(Err(_)) | None => {
            errors.push(FieldError::new(field, INVALID_TIME));
            None
        }
    }
}
