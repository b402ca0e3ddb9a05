//! Storage interface for follow edges.

use crate::directory::UserId;
use crate::graph::edge::Edge;

/// What a toggle did to the edge set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeChange {
    Added,
    Removed,
}

/// Injectable storage for the follow relation.
///
/// `add_edge` and `remove_edge` must be idempotent and atomic for a single
/// edge. Implementations that can flip an edge in one step should override
/// [`EdgeStore::toggle_edge`]; the provided version is a check-then-act over
/// the three primitives and is only as strong as they are.
pub trait EdgeStore: Send + Sync {
    /// Whether `edge` is present.
    fn has_edge(&self, edge: &Edge) -> bool;

    /// Insert `edge`. Returns `false` if it was already present.
    fn add_edge(&self, edge: Edge) -> bool;

    /// Remove `edge`. Returns `false` if it was absent.
    fn remove_edge(&self, edge: &Edge) -> bool;

    /// Invert the presence of `edge`.
    fn toggle_edge(&self, edge: Edge) -> EdgeChange {
        if self.has_edge(&edge) {
            self.remove_edge(&edge);
            EdgeChange::Removed
        } else {
            self.add_edge(edge);
            EdgeChange::Added
        }
    }

    /// Users following `user`, ascending by id.
    fn followers_of(&self, user: UserId) -> Vec<UserId>;

    /// Users `user` follows, ascending by id.
    fn following_of(&self, user: UserId) -> Vec<UserId>;

    /// Total number of edges.
    fn edge_count(&self) -> usize;
}
