//! Driving port for account operations.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::user::{NewUser, User, UserId, UserPatch};

/// Account use-cases consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Accounts: Send + Sync {
    /// Register a new user; duplicate usernames conflict.
    async fn signup(&self, details: NewUser) -> Result<User, Error>;

    /// Verify credentials and issue a bearer token.
    ///
    /// Wrong username and wrong password fail with the same error so the
    /// response shape does not leak which usernames exist.
    async fn login(&self, username: &str, password: &str) -> Result<String, Error>;

    /// Fetch the caller's own profile.
    async fn profile(&self, user: UserId) -> Result<User, Error>;

    /// Partially update the caller's own profile under the sentinel-skip
    /// rule. A user implicitly owns their profile, so no ownership field is
    /// checked.
    async fn update_profile(&self, user: UserId, patch: UserPatch) -> Result<(), Error>;
}
