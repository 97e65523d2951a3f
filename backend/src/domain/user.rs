//! User data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ownership::{patch_text, SentinelPatch};

/// Stable user identifier, assigned by the store on signup.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Access the raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors raised when registering a user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Registered user.
///
/// ## Invariants
/// - `username` is unique across the store.
/// - The password is stored verbatim; hashing is an explicit non-goal of the
///   source contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub phone: String,
    pub password: String,
    pub name: String,
    pub city: String,
}

/// Details supplied at signup, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub phone: String,
    pub password: String,
    pub name: String,
    pub city: String,
}

impl NewUser {
    /// Enforce the signup invariants.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if self.password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(())
    }
}

/// Partial profile update.
///
/// Every field is present on the wire; the sentinel-skip rule decides which
/// of them actually apply. Username and password are not updatable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPatch {
    pub phone: String,
    pub name: String,
    pub city: String,
}

impl SentinelPatch<User> for UserPatch {
    fn merge_into(&self, target: &mut User) {
        patch_text(&mut target.phone, &self.phone);
        patch_text(&mut target.name, &self.name);
        patch_text(&mut target.city, &self.city);
    }
}
