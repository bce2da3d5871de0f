use std::path::PathBuf;
use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::repository::{PostRepository, UserRepository};
use crate::services::HttpService;

/// Server state - shared handles for every service
///
/// Cheap to clone: the store handle and JWT service are shared
/// references.
///
/// | Field | Purpose |
/// |-------|---------|
/// | config | immutable configuration |
/// | db | embedded document store |
/// | jwt_service | session token service |
/// | http | HTTP service (router + serve) |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded document store
    pub db: Surreal<Db>,
    /// Session token service
    pub jwt_service: Arc<JwtService>,
    /// HTTP service
    pub http: HttpService,
}

impl ServerState {
    /// Initialize server state
    ///
    /// Creates the work directory layout, opens the store and builds the
    /// services.
    ///
    /// # Panics
    ///
    /// Panics when the work directory cannot be created or the store
    /// fails to open; the server cannot run without either.
    pub async fn initialize(config: &Config) -> Self {
        let work_dir = PathBuf::from(&config.work_dir);
        for dir in [work_dir.clone(), work_dir.join("uploads/images")] {
            std::fs::create_dir_all(&dir)
                .unwrap_or_else(|e| panic!("Failed to create {}: {}", dir.display(), e));
        }

        let db = crate::db::init(&work_dir)
            .await
            .unwrap_or_else(|e| panic!("Failed to initialize document store: {}", e));

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let http = HttpService::new(config.clone());

        Self {
            config: config.clone(),
            db,
            jwt_service,
            http,
        }
    }

    /// Store handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Session token service
    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Work directory root
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    /// Directory for uploaded profile pictures
    pub fn uploads_dir(&self) -> PathBuf {
        self.work_dir().join("uploads/images")
    }

    /// User repository
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.db.clone())
    }

    /// Post repository
    pub fn posts(&self) -> PostRepository {
        PostRepository::new(self.db.clone())
    }
}
