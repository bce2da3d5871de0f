//! User Repository

use super::{BaseRepository, RepoError, RepoResult, now_millis};
use crate::db::models::{PostId, User, UserCreate, UserId};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &UserId) -> RepoResult<Option<User>> {
        let user: Option<User> = self.base.db().select(id.clone()).await?;
        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Find user by username
    pub async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let username_owned = username.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE username = $username LIMIT 1")
            .bind(("username", username_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new user
    ///
    /// The password is hashed here; the plaintext never reaches the store.
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        // Check duplicate email
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate("User already exists".to_string()));
        }

        // Check duplicate username
        if self.find_by_username(&data.username).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Username '{}' already taken",
                data.username
            )));
        }

        // Hash password
        let password_hash = User::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let now = now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE user SET
                    username = $username,
                    email = $email,
                    password_hash = $password_hash,
                    name = $name,
                    age = $age,
                    profile_pic = 'default.webp',
                    posts = [],
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("username", data.username))
            .bind(("email", data.email))
            .bind(("password_hash", password_hash))
            .bind(("name", data.name))
            .bind(("age", data.age))
            .bind(("now", now))
            .await?;

        let created: Option<User> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Append a post to the user's owned-post list
    pub async fn append_post(&self, id: &UserId, post: PostId) -> RepoResult<User> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    posts = array::append(posts, $post),
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", id.clone()))
            .bind(("post", post))
            .bind(("now", now_millis()))
            .await?;

        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Set the user's profile picture filename
    pub async fn set_profile_pic(&self, id: &UserId, filename: &str) -> RepoResult<User> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    profile_pic = $filename,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", id.clone()))
            .bind(("filename", filename.to_string()))
            .bind(("now", now_millis()))
            .await?;

        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }
}
