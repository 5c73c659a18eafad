//! Slot-schedule domain module.
//!
//! Turns a session form plus a set of calendar dates into a validated
//! configuration, and expands that configuration into bookable slots.
//!
//! # Module Structure
//!
//! - `time`: minute-resolution time-of-day values
//! - `form`: raw form input, coercion, and error reporting types
//! - `model`: `SessionConfig`, `ScheduleRules`, `Slot`
//! - `validator`: `ScheduleValidator`
//! - `generator`: `SlotGenerator`
//!
//! # Usage
//!
//! ```
//! use lensbook_core::schedule::{FormField, ScheduleValidator, SessionForm, SessionSubmission, SlotGenerator};
//!
//! let submission = SessionSubmission {
//!     form: SessionForm::new()
//!         .with(FormField::Name, "Spring Minis")
//!         .with(FormField::Duration, "30")
//!         .with(FormField::Price, "100")
//!         .with(FormField::StartTime, "09:00")
//!         .with(FormField::EndTime, "10:00")
//!         .with(FormField::NumberOfSpots, "2"),
//!     selected_dates: vec!["2024-06-01".to_string()],
//! };
//! let config = ScheduleValidator::validate(&submission).unwrap();
//! let slots = SlotGenerator::generate(&config).unwrap();
//! assert_eq!(slots.len(), 2);
//! ```

mod form;
mod generator;
mod model;
mod time;
pub mod validator;

pub use form::{
    Coerced, FieldError, FormField, SelectionError, SessionForm, SessionSubmission,
    SubmissionErrors,
};
pub use generator::{SlotGenerator, SpotTimes};
pub use model::{ScheduleRules, SessionConfig, SessionDetails, SessionFields, Slot};
pub use time::{InvalidTimeFormat, MINUTES_PER_DAY, TimeOfDay};
pub use validator::ScheduleValidator;
