//! User identity types and the directory interface.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque, unique user identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Errors that can occur during directory operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// No user has this username.
    #[error("user not found: {0}")]
    NotFound(String),

    /// No user has this id.
    #[error("user id not found: {0}")]
    UnknownId(UserId),

    /// Registration collided with an existing username.
    #[error("username already taken: {0}")]
    UsernameTaken(String),

    /// Username is empty, too long, or uses characters outside `[A-Za-z0-9@.+_-]`.
    #[error("invalid username: {0}")]
    InvalidUsername(String),
}

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Resolves and manages user identities.
pub trait UserDirectory: Send + Sync {
    /// Resolve a username to its user. Fails with [`DirectoryError::NotFound`].
    fn resolve(&self, username: &str) -> DirectoryResult<User>;

    /// Look up a user by id.
    fn get(&self, id: UserId) -> Option<User>;

    /// Register a new user.
    fn register(&self, username: &str, bio: Option<String>) -> DirectoryResult<User>;

    /// Replace a user's bio, returning the updated user.
    fn update_bio(&self, id: UserId, bio: Option<String>) -> DirectoryResult<User>;

    /// Number of registered users.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
