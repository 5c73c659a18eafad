//! Commands that work on a submission without touching storage.

use super::SubmissionArgs;
use super::utils::print_json;
use anyhow::{Result, bail};
use lensbook_application::{CreateSessionError, SessionUseCase};
use lensbook_core::schedule::{ScheduleValidator, SubmissionErrors};

/// Prints the field errors and fails.
pub(super) fn reject(errors: &SubmissionErrors) -> Result<()> {
    print_json(errors)?;
    bail!("Submission is invalid: {}", errors)
}

pub fn validate(args: &SubmissionArgs) -> Result<()> {
    let submission = args.load()?;
    match ScheduleValidator::validate(&submission) {
        Ok(config) => print_json(&config),
        Err(errors) => reject(&errors),
    }
}

pub fn preview(args: &SubmissionArgs) -> Result<()> {
    let submission = args.load()?;
    match SessionUseCase::preview(&submission) {
        Ok(preview) => print_json(&preview.slots),
        Err(CreateSessionError::Invalid(errors)) => reject(&errors),
        Err(e) => Err(e.into()),
    }
}
