use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/perch | work directory (store, uploads, logs) |
/// | HTTP_PORT | 3000 | HTTP service port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | JWT_SECRET | (generated in dev) | token signing secret |
/// | JWT_EXPIRATION_MINUTES | 10080 | token lifetime |
/// | JWT_ISSUER | perch-server | token issuer |
#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory holding the store, uploads and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Session token configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/perch".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override work directory and port, commonly for tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
