//! Authentication module
//!
//! The credential guard: token issuance/verification and the session
//! middleware that protects identity-required routes.
//!
//! - [`JwtService`] - session token service
//! - [`CurrentUser`] - current user context
//! - [`require_session`] - session middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{
    Claims, CurrentUser, JwtConfig, JwtError, JwtService, TOKEN_COOKIE, clear_session_cookie,
    session_cookie,
};
pub use middleware::require_session;
