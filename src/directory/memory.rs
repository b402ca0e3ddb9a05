//! In-memory user directory.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::config::DirectoryConfig;
use crate::directory::user::{DirectoryError, DirectoryResult, User, UserDirectory, UserId};
use crate::observability::metrics;

/// A thread-safe directory keyed by both username and id.
///
/// Registration takes the username entry lock first, so two concurrent
/// registrations of the same name cannot both succeed.
#[derive(Clone)]
pub struct MemoryDirectory {
    by_name: Arc<DashMap<String, UserId>>,
    by_id: Arc<DashMap<UserId, User>>,
    next_id: Arc<AtomicU64>,
    rules: DirectoryConfig,
}

impl MemoryDirectory {
    pub fn new(rules: DirectoryConfig) -> Self {
        Self {
            by_name: Arc::new(DashMap::new()),
            by_id: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicU64::new(1)),
            rules,
        }
    }

    /// Check length bounds and the allowed character set.
    pub fn validate_username(&self, username: &str) -> DirectoryResult<()> {
        let len = username.chars().count();
        let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');

        if len < self.rules.min_username_len
            || len > self.rules.max_username_len
            || !username.chars().all(allowed)
        {
            return Err(DirectoryError::InvalidUsername(username.to_string()));
        }
        Ok(())
    }

    /// All users, ordered by id.
    pub fn users(&self) -> Vec<User> {
        let mut users: Vec<User> = self.by_id.iter().map(|r| r.value().clone()).collect();
        users.sort_by_key(|u| u.id);
        users
    }

    /// Insert users restored from a snapshot.
    ///
    /// Later entries win on username collisions. The id counter is moved past
    /// the largest restored id.
    pub fn restore(&self, users: impl IntoIterator<Item = User>) {
        for user in users {
            if let Some(old_id) = self.by_name.insert(user.username.clone(), user.id) {
                if old_id != user.id {
                    self.by_id.remove(&old_id);
                }
            }
            self.next_id.fetch_max(user.id.0 + 1, Ordering::SeqCst);
            self.by_id.insert(user.id, user);
        }
    }
}

impl Default for MemoryDirectory {
    fn default() -> Self {
        Self::new(DirectoryConfig::default())
    }
}

impl UserDirectory for MemoryDirectory {
    fn resolve(&self, username: &str) -> DirectoryResult<User> {
        let id = self
            .by_name
            .get(username)
            .map(|r| *r.value())
            .ok_or_else(|| DirectoryError::NotFound(username.to_string()))?;

        self.get(id)
            .ok_or_else(|| DirectoryError::NotFound(username.to_string()))
    }

    fn get(&self, id: UserId) -> Option<User> {
        self.by_id.get(&id).map(|r| r.value().clone())
    }

    fn register(&self, username: &str, bio: Option<String>) -> DirectoryResult<User> {
        self.validate_username(username)?;

        match self.by_name.entry(username.to_string()) {
            Entry::Occupied(_) => Err(DirectoryError::UsernameTaken(username.to_string())),
            Entry::Vacant(slot) => {
                let id = UserId(self.next_id.fetch_add(1, Ordering::SeqCst));
                let user = User {
                    id,
                    username: username.to_string(),
                    bio,
                };
                self.by_id.insert(id, user.clone());
                slot.insert(id);

                metrics::record_registration();
                tracing::info!(user_id = %id, username = %username, "User registered");
                Ok(user)
            }
        }
    }

    fn update_bio(&self, id: UserId, bio: Option<String>) -> DirectoryResult<User> {
        let mut entry = self
            .by_id
            .get_mut(&id)
            .ok_or(DirectoryError::UnknownId(id))?;
        entry.bio = bio;
        Ok(entry.value().clone())
    }

    fn len(&self) -> usize {
        self.by_id.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_resolve() {
        let dir = MemoryDirectory::default();
        let alice = dir.register("alice", Some("hi".into())).unwrap();

        let resolved = dir.resolve("alice").unwrap();
        assert_eq!(resolved, alice);
        assert_eq!(dir.get(alice.id).unwrap().bio.as_deref(), Some("hi"));
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn test_unknown_username() {
        let dir = MemoryDirectory::default();
        dir.register("alice", None).unwrap();
        assert_eq!(
            dir.resolve("ghost"),
            Err(DirectoryError::NotFound("ghost".into()))
        );
    }

    #[test]
    fn test_usernames_are_case_sensitive_and_unique() {
        let dir = MemoryDirectory::default();
        let a = dir.register("alice", None).unwrap();
        let b = dir.register("Alice", None).unwrap();
        assert_ne!(a.id, b.id);

        assert_eq!(
            dir.register("alice", None),
            Err(DirectoryError::UsernameTaken("alice".into()))
        );
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn test_username_rules() {
        let dir = MemoryDirectory::new(DirectoryConfig {
            min_username_len: 3,
            max_username_len: 8,
        });

        assert!(dir.register("bob.s+x", None).is_ok());
        assert!(dir.register("a_b-c@d", None).is_ok());
        for bad in ["", "ab", "waytoolongname", "has space", "slash/y", "ünï"] {
            assert_eq!(
                dir.register(bad, None),
                Err(DirectoryError::InvalidUsername(bad.into())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_update_bio() {
        let dir = MemoryDirectory::default();
        let alice = dir.register("alice", None).unwrap();

        let updated = dir.update_bio(alice.id, Some("rustacean".into())).unwrap();
        assert_eq!(updated.bio.as_deref(), Some("rustacean"));
        assert_eq!(dir.resolve("alice").unwrap().bio.as_deref(), Some("rustacean"));

        assert_eq!(
            dir.update_bio(UserId(999), None),
            Err(DirectoryError::UnknownId(UserId(999)))
        );
    }

    #[test]
    fn test_restore_advances_ids() {
        let dir = MemoryDirectory::default();
        dir.restore(vec![
            User { id: UserId(7), username: "carol".into(), bio: None },
            User { id: UserId(3), username: "dave".into(), bio: None },
        ]);

        assert_eq!(dir.resolve("carol").unwrap().id, UserId(7));
        let erin = dir.register("erin", None).unwrap();
        assert_eq!(erin.id, UserId(8));
    }

    #[test]
    fn test_concurrent_registration_of_same_name() {
        let dir = MemoryDirectory::default();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let dir = dir.clone();
                std::thread::spawn(move || dir.register("race", None).is_ok())
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(wins, 1);
        assert_eq!(dir.len(), 1);
    }
}
