//! The follow/unfollow toggle.

use std::sync::Arc;

use crate::directory::{User, UserDirectory};
use crate::graph::{Edge, EdgeChange, EdgeStore};
use crate::observability::metrics;
use crate::relationship::types::{FollowError, FollowOutcome, FollowState};

/// Flips follow edges between users.
#[derive(Clone)]
pub struct FollowService {
    directory: Arc<dyn UserDirectory>,
    edges: Arc<dyn EdgeStore>,
}

impl FollowService {
    pub fn new(directory: Arc<dyn UserDirectory>, edges: Arc<dyn EdgeStore>) -> Self {
        Self { directory, edges }
    }

    /// Toggle whether `actor` follows `target_username`.
    ///
    /// `actor` must already be authenticated. On error the edge set is
    /// unchanged.
    pub fn toggle_follow(
        &self,
        actor: &User,
        target_username: &str,
    ) -> Result<FollowOutcome, FollowError> {
        let target = match self.directory.resolve(target_username) {
            Ok(user) => user,
            Err(e) => {
                tracing::debug!(actor = %actor.username, target = %target_username, "Follow target not found");
                metrics::record_toggle("not_found");
                return Err(e.into());
            }
        };

        let edge = match Edge::new(actor.id, target.id) {
            Ok(edge) => edge,
            Err(_) => {
                tracing::debug!(actor = %actor.username, "Rejected self-follow");
                metrics::record_toggle("self_follow");
                return Err(FollowError::InvalidOperation);
            }
        };

        let state = match self.edges.toggle_edge(edge) {
            EdgeChange::Added => FollowState::Followed,
            EdgeChange::Removed => FollowState::Unfollowed,
        };

        metrics::record_toggle(state.as_str());
        tracing::info!(
            actor = %actor.username,
            target = %target.username,
            state = %state,
            "Follow toggled"
        );

        Ok(FollowOutcome {
            state,
            username: target.username,
        })
    }

    /// Whether `actor` currently follows `target`.
    pub fn is_following(&self, actor: &User, target: &User) -> bool {
        Edge::new(actor.id, target.id)
            .map(|edge| self.edges.has_edge(&edge))
            .unwrap_or(false)
    }

    /// Users following `user`, ascending by id. Ids no longer in the directory are skipped.
    pub fn followers(&self, user: &User) -> Vec<User> {
        self.edges
            .followers_of(user.id)
            .into_iter()
            .filter_map(|id| self.directory.get(id))
            .collect()
    }

    /// Users `user` follows, ascending by id.
    pub fn following(&self, user: &User) -> Vec<User> {
        self.edges
            .following_of(user.id)
            .into_iter()
            .filter_map(|id| self.directory.get(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::MemoryDirectory;
    use crate::graph::MemoryEdgeStore;

    struct Fixture {
        service: FollowService,
        edges: MemoryEdgeStore,
        alice: User,
        bob: User,
    }

    fn fixture() -> Fixture {
        let directory = MemoryDirectory::default();
        let edges = MemoryEdgeStore::new();
        let alice = directory.register("alice", None).unwrap();
        let bob = directory.register("bob", None).unwrap();
        let service = FollowService::new(Arc::new(directory), Arc::new(edges.clone()));
        Fixture { service, edges, alice, bob }
    }

    #[test]
    fn test_first_toggle_follows() {
        let f = fixture();
        let outcome = f.service.toggle_follow(&f.alice, "bob").unwrap();

        assert_eq!(outcome.state, FollowState::Followed);
        assert_eq!(outcome.username, "bob");
        assert_eq!(f.service.following(&f.alice), vec![f.bob.clone()]);
        assert_eq!(f.service.followers(&f.bob), vec![f.alice.clone()]);
        assert!(f.service.is_following(&f.alice, &f.bob));
        assert!(!f.service.is_following(&f.bob, &f.alice));
    }

    #[test]
    fn test_double_toggle_restores_edge_set() {
        let f = fixture();
        f.edges.add_edge(Edge::new(f.bob.id, f.alice.id).unwrap());
        let before = f.edges.edges();

        let first = f.service.toggle_follow(&f.alice, "bob").unwrap();
        let second = f.service.toggle_follow(&f.alice, "bob").unwrap();

        assert_eq!(first.state, FollowState::Followed);
        assert_eq!(second.state, FollowState::Unfollowed);
        assert_eq!(f.edges.edges(), before);
    }

    #[test]
    fn test_self_follow_rejected_regardless_of_state() {
        let f = fixture();
        assert_eq!(
            f.service.toggle_follow(&f.alice, "alice"),
            Err(FollowError::InvalidOperation)
        );
        assert_eq!(f.edges.edge_count(), 0);

        f.service.toggle_follow(&f.alice, "bob").unwrap();
        let before = f.edges.edges();
        assert_eq!(
            f.service.toggle_follow(&f.alice, "alice"),
            Err(FollowError::InvalidOperation)
        );
        assert_eq!(f.edges.edges(), before);
    }

    #[test]
    fn test_unknown_target() {
        let f = fixture();
        assert_eq!(
            f.service.toggle_follow(&f.alice, "ghost"),
            Err(FollowError::NotFound("ghost".into()))
        );
        assert_eq!(f.edges.edge_count(), 0);
    }

    #[test]
    fn test_unknown_target_checked_before_self() {
        // An actor missing from the directory still gets NotFound for its own name.
        let f = fixture();
        let stranger = User {
            id: crate::directory::UserId(99),
            username: "stranger".into(),
            bio: None,
        };
        assert_eq!(
            f.service.toggle_follow(&stranger, "stranger"),
            Err(FollowError::NotFound("stranger".into()))
        );
    }

    #[test]
    fn test_follow_unfollow_self_scenario() {
        let f = fixture();

        let outcome = f.service.toggle_follow(&f.alice, "bob").unwrap();
        assert_eq!(outcome.detail(), "followed bob");
        assert_eq!(f.edges.edges(), vec![Edge::new(f.alice.id, f.bob.id).unwrap()]);

        let outcome = f.service.toggle_follow(&f.alice, "bob").unwrap();
        assert_eq!(outcome.detail(), "unfollowed bob");
        assert!(f.edges.edges().is_empty());

        assert!(f.service.toggle_follow(&f.alice, "alice").is_err());
        assert!(f.edges.edges().is_empty());
    }

    #[test]
    fn test_concurrent_toggles_odd_total() {
        let f = fixture();
        let handles: Vec<_> = (0..5)
            .map(|_| {
                let service = f.service.clone();
                let alice = f.alice.clone();
                std::thread::spawn(move || {
                    for _ in 0..101 {
                        service.toggle_follow(&alice, "bob").unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        // 505 toggles: odd, so alice ends up following bob exactly once.
        assert_eq!(f.edges.edge_count(), 1);
        assert!(f.service.is_following(&f.alice, &f.bob));
    }
}
