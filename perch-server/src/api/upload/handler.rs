//! Profile Picture Upload Handler
//!
//! Accepts one multipart image field, stores it under a random name and
//! points the caller's profile at it.

use axum::extract::{Multipart, State};
use axum::response::Redirect;
use rand::RngCore;
use std::path::PathBuf;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Maximum file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image extensions
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

/// 12 random bytes, hex-encoded, keeping the original extension
fn random_filename(ext: &str) -> String {
    let mut bytes = [0u8; 12];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("{}.{}", hex::encode(bytes), ext)
}

/// Validate uploaded image data
fn validate_image(data: &[u8], ext: &str) -> Result<(), AppError> {
    if data.is_empty() {
        return Err(AppError::validation("Empty file provided"));
    }

    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    if !SUPPORTED_FORMATS.contains(&ext) {
        return Err(AppError::validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    Ok(())
}

/// Upload handler
pub async fn upload(
    State(state): State<ServerState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<Redirect> {
    let images_dir = state.uploads_dir();

    // Find the image field
    let mut field_data: Option<Vec<u8>> = None;
    let mut original_filename = None;

    while let Some(f) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
    {
        let name = f.name().map(|s| s.to_string());
        if name.as_deref() == Some("image") {
            original_filename = f.file_name().map(|s| s.to_string());
            field_data = Some(
                f.bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?
                    .to_vec(),
            );
            break;
        }
    }

    let data = field_data.ok_or_else(|| {
        AppError::validation("No file uploaded. Field name must be 'image'")
    })?;

    let filename = original_filename
        .ok_or_else(|| AppError::validation("No filename provided in image field"))?;

    let ext = PathBuf::from(&filename)
        .extension()
        .and_then(|ext| ext.to_str().map(|s| s.to_lowercase()))
        .ok_or_else(|| AppError::validation(format!("Invalid file extension for: {}", filename)))?;

    validate_image(&data, &ext)?;

    let new_filename = random_filename(&ext);
    let file_path = images_dir.join(&new_filename);

    tokio::fs::write(&file_path, &data)
        .await
        .map_err(|e| AppError::internal(format!("Failed to save file: {}", e)))?;

    let account = state
        .users()
        .find_by_email(&user.email)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    let account_id = account
        .id
        .clone()
        .ok_or_else(|| AppError::internal("User record missing id"))?;

    state.users().set_profile_pic(&account_id, &new_filename).await?;

    tracing::info!(
        user = %account_id,
        original_name = %filename,
        file = %new_filename,
        size = data.len(),
        "Profile picture updated"
    );

    Ok(Redirect::to("/profile"))
}
