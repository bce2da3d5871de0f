//! Session extractor
//!
//! Lets protected handlers take `CurrentUser` as an argument.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Fast path: the session middleware already verified and stored it
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        // Fallback: verify the cookie directly (e.g. a route outside the
        // middleware stack)
        let token = parts
            .headers
            .get(http::header::COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(JwtService::extract_from_cookie)
            .ok_or(AppError::Unauthorized)?;

        match state.jwt_service().verify(token) {
            Ok(claims) => {
                let user = CurrentUser::from(claims);
                parts.extensions.insert(user.clone());
                Ok(user)
            }
            Err(crate::auth::JwtError::ExpiredToken) => Err(AppError::TokenExpired),
            Err(_) => Err(AppError::InvalidToken),
        }
    }
}
