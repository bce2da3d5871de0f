//! Post Repository

use super::{BaseRepository, RepoError, RepoResult, now_millis};
use crate::db::models::{Post, UserId};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct PostRepository {
    base: BaseRepository,
}

impl PostRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn parse_id(id: &str) -> RepoResult<RecordId> {
        id.parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))
    }

    /// Find post by id ("post:xyz" form)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Post>> {
        let thing = Self::parse_id(id)?;
        let post: Option<Post> = self.base.db().select(thing).await?;
        Ok(post)
    }

    /// All posts by one author, newest first
    pub async fn find_by_author(&self, author: &UserId) -> RepoResult<Vec<Post>> {
        let posts: Vec<Post> = self
            .base
            .db()
            .query("SELECT * FROM post WHERE author = $author ORDER BY created_at DESC")
            .bind(("author", author.clone()))
            .await?
            .take(0)?;
        Ok(posts)
    }

    /// Create a new post owned by `author`
    pub async fn create(&self, author: UserId, content: &str) -> RepoResult<Post> {
        let now = now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE post SET
                    author = $author,
                    content = $content,
                    likes = [],
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("author", author))
            .bind(("content", content.to_string()))
            .bind(("now", now))
            .await?;

        let created: Option<Post> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create post".to_string()))
    }

    /// Overwrite a post's content
    pub async fn update_content(&self, id: &str, content: &str) -> RepoResult<Post> {
        let thing = Self::parse_id(id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    content = $content,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("content", content.to_string()))
            .bind(("now", now_millis()))
            .await?;

        result
            .take::<Option<Post>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Post {} not found", id)))
    }

    /// Flip `user`'s membership in the post's like set
    ///
    /// Runs as a single conditional UPDATE so concurrent toggles cannot
    /// lose each other's writes; array::union keeps the set free of
    /// duplicates.
    pub async fn toggle_like(&self, id: &str, user: UserId) -> RepoResult<Post> {
        let thing = Self::parse_id(id)?;

        // Existence check first so a missing post surfaces as NotFound
        let existing: Option<Post> = self.base.db().select(thing.clone()).await?;
        if existing.is_none() {
            return Err(RepoError::NotFound(format!("Post {} not found", id)));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    likes = IF likes CONTAINS $user
                        THEN array::difference(likes, [$user])
                        ELSE array::union(likes, [$user])
                    END,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("user", user))
            .bind(("now", now_millis()))
            .await?;

        result
            .take::<Option<Post>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Post {} not found", id)))
    }
}
