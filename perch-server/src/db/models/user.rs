//! User Model

use super::PostId;
use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::client::UserInfo;
use surrealdb::RecordId;

/// User ID type
pub type UserId = RecordId;

/// User document as stored in the `user` table
///
/// `password_hash` is never serialized out of the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<UserId>,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub age: u32,
    #[serde(default = "default_profile_pic")]
    pub profile_pic: String,
    /// Owned posts, in creation order
    #[serde(default, with = "serde_helpers::record_id_vec")]
    pub posts: Vec<PostId>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_profile_pic() -> String {
    "default.webp".to_string()
}

/// Create user payload
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub name: String,
    pub age: u32,
    pub password: String,
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2 with a per-user random salt
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        UserInfo {
            id: user.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            username: user.username.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            age: user.age,
            profile_pic: user.profile_pic.clone(),
            created_at: user.created_at,
        }
    }
}
