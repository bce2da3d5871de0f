//! Repository Module
//!
//! Provides query objects over the embedded document store, one per table.

pub mod post;
pub mod user;

// Re-exports
pub use post::PostRepository;
pub use user::UserRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: "table:id" strings at the API boundary
// =============================================================================
//
// surrealdb::RecordId handles every document reference:
//   - parse:  let id: RecordId = "post:abc".parse()?;
//   - table:  id.table()
//   - CRUD:   db.select(id) / query("UPDATE $thing ...").bind(("thing", id))

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Current time as epoch milliseconds, the timestamp format stored on
/// every document
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
