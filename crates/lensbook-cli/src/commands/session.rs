use super::form::reject;
use super::utils::{App, SubmissionArgs, print_json, read_images};
use anyhow::{Context, Result};
use lensbook_application::CreateSessionError;
use serde_json::json;
use std::path::PathBuf;

pub async fn create(app: &App, owner: &str, args: &SubmissionArgs, images: &[PathBuf]) -> Result<()> {
    let submission = args.load()?;
    let uploads = read_images(images)?;

    let created = match app.sessions.create_session(owner, &submission, uploads).await {
        Ok(created) => created,
        Err(CreateSessionError::Invalid(errors)) => return reject(&errors),
        Err(e) => return Err(e).context("Failed to create session"),
    };

    print_json(&json!({
        "sessionId": created.session.id,
        "slotCount": created.slot_count,
        "availabilityRows": created.availability.len(),
        "images": created.images,
    }))
}

pub async fn list(app: &App, owner: &str) -> Result<()> {
    let sessions = app
        .sessions
        .list_sessions(owner)
        .await
        .context("Failed to list sessions")?;
    print_json(&sessions)
}

pub async fn show(app: &App, owner: &str, session_id: &str) -> Result<()> {
    let session = app
        .sessions
        .get_session(owner, session_id)
        .await
        .with_context(|| format!("Failed to load session {}", session_id))?;
    let availability = app.sessions.list_availability(owner, session_id).await?;
    let images = app.images.list_images(session_id).await?;

    print_json(&json!({
        "session": session,
        "availability": availability,
        "images": images,
    }))
}
