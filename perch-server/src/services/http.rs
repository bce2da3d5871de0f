//! HTTP service
//!
//! Router assembly, middleware stack, in-process dispatch and serving.

use crate::auth::require_session;
use crate::core::{Config, ServerState};
use axum::{Router, middleware};
use std::net::SocketAddr;
use std::sync::{Arc, RwLock};
use tower::Service;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

pub type OneshotResult =
    Result<http::Response<axum::body::Body>, Box<dyn std::error::Error + Send + Sync>>;

/// HTTP request log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::auth::router())
        .merge(crate::api::health::router())
        .merge(crate::api::profile::router())
        .merge(crate::api::posts::router())
        .merge(crate::api::upload::router())
}

#[derive(Clone, Debug)]
pub struct HttpService {
    config: Config,
    router: Arc<RwLock<Option<Router>>>,
}

impl HttpService {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            router: Arc::new(RwLock::new(None)),
        }
    }

    /// Initialize the router with the given server state.
    /// This should be called after ServerState is fully initialized.
    pub fn initialize(&self, state: ServerState) {
        let app = build_app()
            // Session middleware at router level; require_session skips
            // the public routes itself
            .layer(middleware::from_fn_with_state(
                state.clone(),
                require_session,
            ))
            .with_state(state)
            // Tower HTTP middleware
            .layer(CorsLayer::permissive())
            .layer(CompressionLayer::new())
            // HTTP request log middleware
            .layer(middleware::from_fn(log_request));

        let mut router = self.router.write().expect("Failed to lock router");
        *router = Some(app);
    }

    pub fn router(&self) -> Option<Router> {
        self.router.read().expect("Failed to lock router").clone()
    }

    /// Dispatch a request through the full middleware stack in-process
    pub async fn oneshot(&self, request: http::Request<axum::body::Body>) -> OneshotResult {
        let router_opt = self.router.read().expect("Failed to lock router").clone();

        match router_opt {
            Some(router) => {
                let mut service = router.clone();
                match service.call(request).await {
                    Ok(response) => Ok(response),
                    Err(_) => Err(crate::utils::AppError::internal("Oneshot call failed").into()),
                }
            }
            None => Err(crate::utils::AppError::internal("HttpService not initialized").into()),
        }
    }

    /// Explicitly start the HTTP server
    pub async fn start_server<F>(&self, shutdown_signal: F) -> Result<(), crate::utils::AppError>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = self.router().ok_or_else(|| {
            crate::utils::AppError::internal("HttpService not initialized with router")
        })?;

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("Starting HTTP server on {}", addr);

        let handle = axum_server::Handle::new();

        // Handle shutdown signal
        let handle_clone = handle.clone();
        tokio::spawn(async move {
            shutdown_signal.await;
            handle_clone.graceful_shutdown(Some(std::time::Duration::from_secs(10)));
        });

        axum_server::bind(addr)
            .handle(handle)
            .serve(app.into_make_service())
            .await
            .map_err(|e| crate::utils::AppError::internal(format!("Server error: {}", e)))?;

        Ok(())
    }
}
