use sqlx::SqlitePool;
use tracing::{debug, error, instrument};

use super::error::RepositoryError;
use super::password::hash_password;
use super::repo_types::{NewUser, User};

/// All SQL access for the `users` table.
///
/// Holds an injected pool; every call checks a connection out for its own
/// duration only.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: SqlitePool,
}

impl UserRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Return every user in store order. An empty table yields an empty vec.
    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password
            FROM users
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!(error = %e, "find_all query failed");
            RepositoryError::FindAllFailed(e)
        })?;
        debug!(count = users.len(), "users loaded");
        Ok(users)
    }

    /// Find a user by exact username.
    #[instrument(skip(self))]
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password
            FROM users
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!(error = %e, "find_by_username query failed");
            RepositoryError::FindByUsernameFailed(e)
        })?;
        Ok(user)
    }

    /// Hash the password, insert the row and commit. Returns the new id.
    #[instrument(skip(self, new_user), fields(username = %new_user.username))]
    pub async fn create(&self, new_user: NewUser) -> Result<i64, RepositoryError> {
        let NewUser { username, password } = new_user;
        let password_hash = hash_password(&password)?;
        drop(password);

        let mut tx = self.db.begin().await.map_err(|e| {
            error!(error = %e, "begin tx failed");
            RepositoryError::CreateFailed(e)
        })?;

        let id = sqlx::query(
            r#"
            INSERT INTO users (username, password)
            VALUES (?1, ?2)
            "#,
        )
        .bind(&username)
        .bind(&password_hash)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!(error = %e, "insert user failed");
            RepositoryError::CreateFailed(e)
        })?
        .last_insert_rowid();

        tx.commit().await.map_err(|e| {
            error!(error = %e, "commit tx failed");
            RepositoryError::CreateFailed(e)
        })?;

        debug!(user_id = id, "user created");
        Ok(id)
    }
}
