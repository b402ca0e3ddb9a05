//! API token registry.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::directory::UserId;

/// One opaque token per user, issued on first request and reused afterwards.
#[derive(Clone, Default)]
pub struct TokenStore {
    by_key: Arc<DashMap<String, UserId>>,
    by_user: Arc<DashMap<UserId, String>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the user's token, minting one if none exists yet.
    pub fn get_or_create(&self, user: UserId) -> String {
        match self.by_user.entry(user) {
            Entry::Occupied(existing) => existing.get().clone(),
            Entry::Vacant(slot) => {
                let key = uuid::Uuid::new_v4().simple().to_string();
                self.by_key.insert(key.clone(), user);
                slot.insert(key.clone());
                tracing::debug!(user_id = %user, "Issued API token");
                key
            }
        }
    }

    /// Map a presented key to its user.
    pub fn authenticate(&self, key: &str) -> Option<UserId> {
        self.by_key.get(key).map(|r| *r.value())
    }

    /// All `(key, user)` pairs, for snapshots.
    pub fn entries(&self) -> Vec<(String, UserId)> {
        let mut entries: Vec<_> = self
            .by_key
            .iter()
            .map(|r| (r.key().clone(), *r.value()))
            .collect();
        entries.sort_by_key(|(_, user)| *user);
        entries
    }

    pub fn restore(&self, entries: impl IntoIterator<Item = (String, UserId)>) {
        for (key, user) in entries {
            if let Some(old) = self.by_user.insert(user, key.clone()) {
                self.by_key.remove(&old);
            }
            self.by_key.insert(key, user);
        }
    }
}
