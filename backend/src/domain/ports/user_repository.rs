//! Port for user persistence.

use async_trait::async_trait;

use crate::domain::user::{NewUser, User, UserId};

/// Errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// The storage backend failed.
    #[error("user storage failed: {message}")]
    Storage { message: String },
    /// The username is already taken.
    #[error("username already taken: {username}")]
    DuplicateUsername { username: String },
    /// No user with the given id exists to update.
    #[error("no user with id {id}")]
    Missing { id: UserId },
}

/// Port for user storage and retrieval.
///
/// `insert` assigns the next identifier and persists the user atomically;
/// `update` replaces a single existing row. No multi-entity transactions are
/// offered.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user, assigning its id.
    async fn insert(&self, user: NewUser) -> Result<User, UserRepositoryError>;

    /// Fetch a user by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by unique username.
    async fn find_by_username(&self, username: &str)
        -> Result<Option<User>, UserRepositoryError>;

    /// Replace an existing user row.
    async fn update(&self, user: &User) -> Result<(), UserRepositoryError>;
}
