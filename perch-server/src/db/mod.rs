//! Database Module
//!
//! Embedded SurrealDB document store: connection bootstrap and the
//! uniqueness indexes the data model relies on.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

/// Open the embedded store under `<work_dir>/database` and apply index
/// definitions
pub async fn init(work_dir: &Path) -> Result<Surreal<Db>, AppError> {
    let db: Surreal<Db> = Surreal::new::<RocksDb>(work_dir.join("database"))
        .await
        .map_err(|e| AppError::database(format!("Failed to open store: {}", e)))?;

    db.use_ns("perch")
        .use_db("perch")
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;

    define_indexes(&db).await?;

    tracing::info!("Document store ready");
    Ok(db)
}

/// Uniqueness is enforced at the store level; repositories also check
/// before create to return a friendly error
async fn define_indexes(db: &Surreal<Db>) -> Result<(), AppError> {
    const DEFINITIONS: &[&str] = &[
        "DEFINE INDEX IF NOT EXISTS user_email ON user FIELDS email UNIQUE",
        "DEFINE INDEX IF NOT EXISTS user_username ON user FIELDS username UNIQUE",
        "DEFINE INDEX IF NOT EXISTS post_author ON post FIELDS author",
    ];

    for definition in DEFINITIONS {
        db.query(*definition)
            .await
            .map_err(|e| AppError::database(format!("Failed to define index: {}", e)))?;
    }
    Ok(())
}
