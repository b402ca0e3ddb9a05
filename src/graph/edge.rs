//! Directed follow edge.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::directory::UserId;

/// Returned when an edge would point from a user to itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("user {0} cannot follow itself")]
pub struct SelfEdge(pub UserId);

/// A directed `follower → followee` relation.
///
/// Can only be built through [`Edge::new`], so a self-loop is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawEdge")]
pub struct Edge {
    follower: UserId,
    followee: UserId,
}

#[derive(Deserialize)]
struct RawEdge {
    follower: UserId,
    followee: UserId,
}

impl TryFrom<RawEdge> for Edge {
    type Error = SelfEdge;

    fn try_from(raw: RawEdge) -> Result<Self, Self::Error> {
        Edge::new(raw.follower, raw.followee)
    }
}

impl Edge {
    pub fn new(follower: UserId, followee: UserId) -> Result<Self, SelfEdge> {
        if follower == followee {
            return Err(SelfEdge(follower));
        }
        Ok(Self { follower, followee })
    }

    pub fn follower(&self) -> UserId {
        self.follower
    }

    pub fn followee(&self) -> UserId {
        self.followee
    }
}
