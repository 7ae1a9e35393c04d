use lazy_static::lazy_static;
use tracing::{info, warn};

use super::error::RepositoryError;
use super::password::{hash_password, verify_password};
use super::repo_types::{NewUser, User};
use super::store::UserStore;

lazy_static! {
    // Verified against on unknown usernames so both login paths pay for Argon2.
    static ref DUMMY_HASH: Option<String> = hash_password("dummy-password").ok();
}

/// Usernames are stored and looked up trimmed.
fn normalize_username(username: &str) -> &str {
    username.trim()
}

/// Look up `username` and check `password` against the stored hash.
///
/// Unknown usernames and wrong passwords both yield `Ok(None)`.
pub async fn authenticate(
    store: &dyn UserStore,
    username: &str,
    password: &str,
) -> Result<Option<User>, RepositoryError> {
    let username = normalize_username(username);
    let Some(user) = store.find_by_username(username).await? else {
        if let Some(dummy) = DUMMY_HASH.as_deref() {
            let _ = verify_password(password, dummy);
        }
        warn!(username, "login unknown username");
        return Ok(None);
    };

    if !verify_password(password, &user.password)? {
        warn!(user_id = user.id, "login wrong password");
        return Ok(None);
    }

    info!(user_id = user.id, "user authenticated");
    Ok(Some(user))
}

/// Store a new user with a trimmed username. Returns the assigned id.
pub async fn register(
    store: &dyn UserStore,
    username: &str,
    password: &str,
) -> Result<i64, RepositoryError> {
    let id = store
        .create(NewUser::new(normalize_username(username), password))
        .await?;
    info!(user_id = id, "user registered");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::password::hash_password;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeStore {
        users: Mutex<Vec<User>>,
        fail: bool,
    }

    #[async_trait]
    impl UserStore for FakeStore {
        async fn find_all(&self) -> Result<Vec<User>, RepositoryError> {
            if self.fail {
                return Err(RepositoryError::FindAllFailed(sqlx::Error::PoolClosed));
            }
            Ok(self.users.lock().unwrap().clone())
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
            if self.fail {
                return Err(RepositoryError::FindByUsernameFailed(
                    sqlx::Error::PoolClosed,
                ));
            }
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username == username)
                .cloned())
        }

        async fn create(&self, new_user: NewUser) -> Result<i64, RepositoryError> {
            if self.fail {
                return Err(RepositoryError::CreateFailed(sqlx::Error::PoolClosed));
            }
            let mut users = self.users.lock().unwrap();
            let id = users.len() as i64 + 1;
            users.push(User {
                id,
                username: new_user.username,
                password: hash_password(&new_user.password)?,
            });
            Ok(id)
        }
    }

    #[tokio::test]
    async fn authenticate_accepts_correct_password() {
        let store = FakeStore::default();
        let id = register(&store, "alice", "secret123").await.expect("register");
        let user = authenticate(&store, "alice", "secret123")
            .await
            .expect("authenticate")
            .expect("user returned");
        assert_eq!(user.id, id);
    }

    #[tokio::test]
    async fn authenticate_rejects_wrong_password() {
        let store = FakeStore::default();
        register(&store, "alice", "secret123").await.expect("register");
        let user = authenticate(&store, "alice", "nope").await.expect("authenticate");
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn authenticate_unknown_user_is_not_an_error() {
        let store = FakeStore::default();
        let user = authenticate(&store, "ghost", "secret123")
            .await
            .expect("authenticate");
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn authenticate_reports_malformed_stored_hash() {
        let store = FakeStore::default();
        store.users.lock().unwrap().push(User {
            id: 1,
            username: "alice".into(),
            password: "plaintext-by-mistake".into(),
        });
        let err = authenticate(&store, "alice", "plaintext-by-mistake")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Password(_)));
    }

    #[tokio::test]
    async fn register_trims_username() {
        let store = FakeStore::default();
        register(&store, "  alice ", "secret123").await.expect("register");
        assert!(store.find_by_username("alice").await.unwrap().is_some());
    }

    #[test]
    fn dummy_hash_is_a_valid_argon2_hash() {
        let dummy = DUMMY_HASH.as_deref().expect("dummy hash computed");
        assert!(matches!(verify_password("secret123", dummy), Ok(false)));
    }

    #[tokio::test]
    async fn padded_username_logs_in_as_registered() {
        let db = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        crate::db::migrate(&db).await.expect("migrations");
        let repo = crate::users::UserRepository::new(db);

        let id = register(&repo, " alice ", "secret123")
            .await
            .expect("register");
        let user = authenticate(&repo, " alice ", "secret123")
            .await
            .expect("authenticate")
            .expect("padded username accepted");
        assert_eq!(user.id, id);
        assert_eq!(user.username, "alice");

        let user = authenticate(&repo, "alice", "secret123")
            .await
            .expect("authenticate");
        assert!(user.is_some());
    }

    #[tokio::test]
    async fn storage_failures_propagate() {
        let store = FakeStore {
            fail: true,
            ..Default::default()
        };
        assert!(matches!(
            authenticate(&store, "alice", "pw").await,
            Err(RepositoryError::FindByUsernameFailed(_))
        ));
        assert!(matches!(
            register(&store, "alice", "pw").await,
            Err(RepositoryError::CreateFailed(_))
        ));
    }
}
