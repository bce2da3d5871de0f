//! Authentication Handlers
//!
//! Handles registration, login and logout.

use std::time::Duration;

use axum::{
    Json,
    extract::State,
    response::{AppendHeaders, IntoResponse, Redirect},
};
use http::header::SET_COOKIE;

use crate::auth::{clear_session_cookie, session_cookie};
use crate::core::ServerState;
use crate::db::models::UserCreate;
use crate::utils::{AppError, AppResult};

// Re-use shared DTOs for API consistency
use shared::client::{LoginRequest, RegisterRequest, RegisterResponse, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Registration handler
///
/// Creates the user (password hashed in the repository) and issues a
/// session token as a cookie.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    for (field, value) in [
        ("username", &req.username),
        ("email", &req.email),
        ("password", &req.password),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::validation(format!(
                "Field '{}' must not be empty",
                field
            )));
        }
    }

    let user = state
        .users()
        .create(UserCreate {
            username: req.username,
            email: req.email,
            name: req.name,
            age: req.age,
            password: req.password,
        })
        .await?;

    let user_id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    let token = state
        .jwt_service()
        .issue(&user_id, &user.email)
        .map_err(|e| AppError::internal(format!("Failed to issue token: {}", e)))?;

    tracing::info!(user_id = %user_id, username = %user.username, "User registered");

    let response = RegisterResponse {
        token: token.clone(),
        user: UserInfo::from(&user),
    };

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&token))]),
        Json(response),
    ))
}

/// Login handler
///
/// Verifies credentials, issues a session token cookie and sends the
/// client to their profile.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let email = req.email.clone();
    let user = state.users().find_by_email(&email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message for unknown email and wrong password alike
    let user = match user {
        Some(u) => {
            let password_valid = u
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                tracing::warn!(email = %email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            u
        }
        None => {
            tracing::warn!(email = %email, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let user_id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    let token = state
        .jwt_service()
        .issue(&user_id, &user.email)
        .map_err(|e| AppError::internal(format!("Failed to issue token: {}", e)))?;

    tracing::info!(user_id = %user_id, email = %user.email, "User logged in");

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&token))]),
        Redirect::to("/profile"),
    ))
}

/// Logout handler
///
/// Clears the session cookie; no server-side state to drop.
pub async fn logout() -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Redirect::to("/login"),
    )
}
