use super::password::PasswordError;

/// Failures surfaced by the user repository.
///
/// Each storage variant keeps the originating `sqlx::Error` as its source.
/// "No rows" and "not found" are not represented here.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error in user repository 'find_all'")]
    FindAllFailed(#[source] sqlx::Error),

    #[error("database error in user repository 'find_by_username'")]
    FindByUsernameFailed(#[source] sqlx::Error),

    #[error("database error in user repository 'create'")]
    CreateFailed(#[source] sqlx::Error),

    #[error(transparent)]
    Password(#[from] PasswordError),
}
