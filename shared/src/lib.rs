//! Shared types for Perch
//!
//! Request/response types used in API communication between
//! perch-server and its clients.

pub mod client;

// Re-exports
pub use serde::{Deserialize, Serialize};
