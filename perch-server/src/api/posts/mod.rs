//! Post Routes
//!
//! All protected by the session middleware.

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/post", post(handler::create))
        .route("/like/{id}", get(handler::like))
        .route("/edit/{id}", get(handler::edit))
        .route("/update/{id}", post(handler::update))
}
