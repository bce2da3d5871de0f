//! API route modules
//!
//! # Structure
//!
//! - [`auth`] - registration, login, logout
//! - [`profile`] - profile display
//! - [`posts`] - post creation, editing, like toggle
//! - [`upload`] - profile picture upload and serving
//! - [`health`] - health check

pub mod auth;
pub mod health;
pub mod posts;
pub mod profile;
pub mod upload;
