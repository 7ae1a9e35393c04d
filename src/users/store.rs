use async_trait::async_trait;

use super::error::RepositoryError;
use super::repo::UserRepository;
use super::repo_types::{NewUser, User};

/// Storage operations the rest of the application depends on.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>, RepositoryError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
    async fn create(&self, new_user: NewUser) -> Result<i64, RepositoryError>;
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
        UserRepository::find_all(self).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        UserRepository::find_by_username(self, username).await
    }

    async fn create(&self, new_user: NewUser) -> Result<i64, RepositoryError> {
        UserRepository::create(self, new_user).await
    }
}
