//! Post Model

use super::UserId;
use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::client::PostInfo;
use surrealdb::RecordId;

/// Post ID type
pub type PostId = RecordId;

/// Post document as stored in the `post` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<PostId>,
    /// Owning user
    #[serde(with = "serde_helpers::record_id")]
    pub author: UserId,
    pub content: String,
    /// Users that currently like this post. Membership set, never holds
    /// the same user twice.
    #[serde(default, with = "serde_helpers::record_id_vec")]
    pub likes: Vec<UserId>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl Post {
    /// Whether the given user currently likes this post
    pub fn liked_by(&self, user: &UserId) -> bool {
        self.likes.contains(user)
    }
}

impl From<&Post> for PostInfo {
    fn from(post: &Post) -> Self {
        PostInfo {
            id: post.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            author: post.author.to_string(),
            content: post.content.clone(),
            likes: post.likes.iter().map(|id| id.to_string()).collect(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}
