//! Client-related types shared between server and client
//!
//! Common request/response types used in API communication.

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub name: String,
    pub age: u32,
    pub password: String,
}

/// Registration response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User information
///
/// Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: String,
    pub age: u32,
    pub profile_pic: String,
    pub created_at: i64,
}

// =============================================================================
// Post API DTOs
// =============================================================================

/// Create post request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCreateRequest {
    pub content: String,
}

/// Update post request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostUpdateRequest {
    pub content: String,
}

/// Post information as listed on a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostInfo {
    pub id: String,
    pub author: String,
    pub content: String,
    /// User ids that currently like this post (a set, never a counter)
    #[serde(default)]
    pub likes: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Post with its author populated, as served to the edit view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    pub post: PostInfo,
    pub author: UserInfo,
}

/// Profile response: the caller plus their posts, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: UserInfo,
    pub posts: Vec<PostInfo>,
}
