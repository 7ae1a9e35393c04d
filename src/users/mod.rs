pub mod error;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;
pub mod store;

pub use error::RepositoryError;
pub use password::{hash_password, verify_password, PasswordError};
pub use repo::UserRepository;
pub use repo_types::{NewUser, User};
pub use store::UserStore;
