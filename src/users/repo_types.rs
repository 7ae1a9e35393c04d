use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,          // assigned by the store
    pub username: String, // unique per schema
    #[serde(skip_serializing)]
    pub password: String, // Argon2 hash, never plaintext
}

/// A user that has not been stored yet; `password` is plaintext.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}
