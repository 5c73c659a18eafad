use super::utils::{App, print_json};
use anyhow::{Context, Result};

pub async fn list(app: &App, session_id: &str) -> Result<()> {
    let images = app
        .images
        .list_images(session_id)
        .await
        .context("Failed to list images")?;
    print_json(&images)
}

pub async fn delete(app: &App, image_id: &str) -> Result<()> {
    let image = app
        .images
        .delete_image(image_id)
        .await
        .with_context(|| format!("Failed to delete image {}", image_id))?;
    print_json(&image)
}
