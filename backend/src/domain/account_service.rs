//! Account domain service.
//!
//! Signup, login, and profile maintenance. Login compares the stored
//! password verbatim — hashing is an explicit non-goal of the source
//! contract — and fails identically for an unknown username and a wrong
//! password so the response shape does not reveal which usernames exist.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::auth::AccessTokens;
use crate::domain::error::Error;
use crate::domain::ownership::SentinelPatch;
use crate::domain::ports::{Accounts, UserRepository, UserRepositoryError};
use crate::domain::user::{NewUser, User, UserId, UserPatch};

/// Account service implementing the [`Accounts`] driving port.
#[derive(Clone)]
pub struct AccountService<R> {
    users: Arc<R>,
    tokens: AccessTokens,
}

impl<R> AccountService<R> {
    /// Create a new service over a user repository and a token signer.
    pub fn new(users: Arc<R>, tokens: AccessTokens) -> Self {
        Self { users, tokens }
    }
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

fn map_repo_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::DuplicateUsername { username } => {
            tracing::debug!(%username, "signup rejected for duplicate username");
            Error::conflict("username already taken")
        }
        UserRepositoryError::Missing { id } => {
            tracing::debug!(%id, "user row vanished mid-update");
            Error::not_found("user not found")
        }
        UserRepositoryError::Storage { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R: UserRepository> Accounts for AccountService<R> {
    async fn signup(&self, details: NewUser) -> Result<User, Error> {
        details
            .validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.users.insert(details).await.map_err(map_repo_error)
    }

    async fn login(&self, username: &str, password: &str) -> Result<String, Error> {
        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_repo_error)?;
        // Unknown username and wrong password collapse into one failure.
        let Some(user) = user else {
            return Err(invalid_credentials());
        };
        if user.password != password {
            return Err(invalid_credentials());
        }
        self.tokens.issue(user.id)
    }

    async fn profile(&self, user: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user)
            .await
            .map_err(map_repo_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn update_profile(&self, user: UserId, patch: UserPatch) -> Result<(), Error> {
        // A user implicitly owns their own profile; the resolver already
        // pinned the caller to this id, so no ownership field is checked.
        let mut profile = self.profile(user).await?;
        patch.merge_into(&mut profile);
        self.users.update(&profile).await.map_err(map_repo_error)
    }
}
