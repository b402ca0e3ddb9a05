//! In-memory edge store backed by a sharded concurrent map.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::directory::UserId;
use crate::graph::edge::Edge;
use crate::graph::store::{EdgeChange, EdgeStore};
use crate::observability::metrics;

/// A thread-safe edge set.
///
/// Each edge hashes to one shard; `toggle_edge` holds that shard's write
/// lock across the membership check and the mutation.
#[derive(Clone, Default)]
pub struct MemoryEdgeStore {
    edges: Arc<DashMap<Edge, ()>>,
}

impl MemoryEdgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All edges, sorted.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self.edges.iter().map(|r| *r.key()).collect();
        edges.sort();
        edges
    }

    /// Insert edges restored from a snapshot.
    pub fn restore(&self, edges: impl IntoIterator<Item = Edge>) {
        for edge in edges {
            self.edges.insert(edge, ());
        }
        metrics::record_edge_count(self.edges.len());
    }

    fn collect_sorted(&self, pick: impl Fn(&Edge) -> Option<UserId>) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self.edges.iter().filter_map(|r| pick(r.key())).collect();
        ids.sort();
        ids
    }
}

impl EdgeStore for MemoryEdgeStore {
    fn has_edge(&self, edge: &Edge) -> bool {
        self.edges.contains_key(edge)
    }

    fn add_edge(&self, edge: Edge) -> bool {
        let inserted = self.edges.insert(edge, ()).is_none();
        metrics::record_edge_count(self.edges.len());
        inserted
    }

    fn remove_edge(&self, edge: &Edge) -> bool {
        let removed = self.edges.remove(edge).is_some();
        metrics::record_edge_count(self.edges.len());
        removed
    }

    fn toggle_edge(&self, edge: Edge) -> EdgeChange {
        let change = match self.edges.entry(edge) {
            Entry::Occupied(slot) => {
                slot.remove();
                EdgeChange::Removed
            }
            Entry::Vacant(slot) => {
                slot.insert(());
                EdgeChange::Added
            }
        };
        metrics::record_edge_count(self.edges.len());
        change
    }

    fn followers_of(&self, user: UserId) -> Vec<UserId> {
        self.collect_sorted(|e| (e.followee() == user).then(|| e.follower()))
    }

    fn following_of(&self, user: UserId) -> Vec<UserId> {
        self.collect_sorted(|e| (e.follower() == user).then(|| e.followee()))
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
