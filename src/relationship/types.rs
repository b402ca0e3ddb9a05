//! Outcome and error types for the follow toggle.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::directory::DirectoryError;

/// Relationship state after a successful toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FollowState {
    Followed,
    Unfollowed,
}

impl FollowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowState::Followed => "followed",
            FollowState::Unfollowed => "unfollowed",
        }
    }
}

impl fmt::Display for FollowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a toggle, reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowOutcome {
    pub state: FollowState,
    /// Target's username as stored in the directory.
    pub username: String,
}

impl FollowOutcome {
    /// Human-readable summary, e.g. `"followed bob"`.
    pub fn detail(&self) -> String {
        format!("{} {}", self.state, self.username)
    }
}

/// Errors surfaced by the toggle. Both are deterministic and must be fixed
/// by the caller rather than retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FollowError {
    /// Target username does not resolve.
    #[error("user not found: {0}")]
    NotFound(String),

    /// Actor attempted to follow itself.
    #[error("a user cannot follow itself")]
    InvalidOperation,
}

impl From<DirectoryError> for FollowError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound(name)
            | DirectoryError::UsernameTaken(name)
            | DirectoryError::InvalidUsername(name) => FollowError::NotFound(name),
            DirectoryError::UnknownId(id) => FollowError::NotFound(id.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_format() {
        let outcome = FollowOutcome {
            state: FollowState::Unfollowed,
            username: "bob".into(),
        };
        assert_eq!(outcome.detail(), "unfollowed bob");
    }

    #[test]
    fn test_state_serializes_lowercase() {
        let json = serde_json::to_string(&FollowState::Followed).unwrap();
        assert_eq!(json, "\"followed\"");
    }
}
