//! Perch Server - minimal social backend
//!
//! # Architecture
//!
//! - **Authentication** (`auth`): JWT session cookies + Argon2 hashing
//! - **Database** (`db`): embedded SurrealDB document store
//! - **HTTP API** (`api`): route handlers per surface area
//!
//! # Module layout
//!
//! ```text
//! perch-server/src/
//! ├── core/          # config, state, server lifecycle
//! ├── auth/          # token service, session middleware, extractor
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # models and repositories
//! ├── services/      # HTTP service (router assembly, serve, oneshot)
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
