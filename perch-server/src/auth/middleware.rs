//! Session middleware
//!
//! Router-level guard that verifies the `token` cookie before any
//! protected handler runs.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::AppError;
use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;

/// Paths reachable without a session
const PUBLIC_PATHS: &[&str] = &["/register", "/login", "/logout", "/health"];

fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path) || path.starts_with("/uploads/")
}

/// Session middleware - requires a verified token cookie
///
/// Applied as a router-level layer; skips the public paths. On success
/// the verified [`CurrentUser`] is inserted into request extensions.
///
/// | Condition | Response |
/// |-----------|----------|
/// | No `token` cookie | redirect to /login |
/// | Expired token | 401 TokenExpired |
/// | Malformed token / bad signature | 401 InvalidToken |
pub async fn require_session(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // Allow CORS preflight through
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if is_public_path(path) {
        return Ok(next.run(req).await);
    }

    let token = req
        .headers()
        .get(http::header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(JwtService::extract_from_cookie);

    // No cookie at all is not an error: the client simply has no
    // session yet and is sent to login
    let Some(token) = token else {
        tracing::debug!(uri = %req.uri(), "no session cookie, redirecting to login");
        return Ok(Redirect::to("/login").into_response());
    };

    match state.jwt_service().verify(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(error = %e, uri = %req.uri(), "session verification failed");
            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::TokenExpired),
                _ => Err(AppError::InvalidToken),
            }
        }
    }
}
