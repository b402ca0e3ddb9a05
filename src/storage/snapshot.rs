//! JSON snapshot of users, tokens and edges.
//!
//! Loaded once at startup and written on graceful shutdown. The file is
//! replaced through a temporary sibling so a crash mid-write leaves the
//! previous snapshot intact.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::auth::TokenStore;
use crate::directory::{MemoryDirectory, User, UserId};
use crate::graph::{Edge, MemoryEdgeStore};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub tokens: Vec<(String, UserId)>,
    pub edges: Vec<Edge>,
}

impl Snapshot {
    /// Copy the current contents of the stores.
    pub fn capture(directory: &MemoryDirectory, tokens: &TokenStore, edges: &MemoryEdgeStore) -> Self {
        Self {
            users: directory.users(),
            tokens: tokens.entries(),
            edges: edges.edges(),
        }
    }

    /// Load stores from this snapshot.
    ///
    /// Edges that reference unknown users are dropped.
    pub fn restore_into(self, directory: &MemoryDirectory, tokens: &TokenStore, edges: &MemoryEdgeStore) {
        let known = |id: UserId| self.users.iter().any(|u| u.id == id);
        let valid_edges: Vec<Edge> = self
            .edges
            .iter()
            .copied()
            .filter(|e| known(e.follower()) && known(e.followee()))
            .collect();
        let dropped = self.edges.len() - valid_edges.len();
        if dropped > 0 {
            tracing::warn!(dropped, "Snapshot contained edges for unknown users");
        }
        let valid_tokens: Vec<(String, UserId)> = self
            .tokens
            .iter()
            .filter(|(_, id)| known(*id))
            .cloned()
            .collect();

        directory.restore(self.users);
        tokens.restore(valid_tokens);
        edges.restore(valid_edges);
    }

    /// Read a snapshot. A missing file yields `Ok(None)`.
    pub fn load_from_file(path: &Path) -> std::io::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let reader = BufReader::new(File::open(path)?);
        let snapshot: Snapshot = serde_json::from_reader(reader)?;
        tracing::info!(
            path = %path.display(),
            users = snapshot.users.len(),
            edges = snapshot.edges.len(),
            "Loaded snapshot"
        );
        Ok(Some(snapshot))
    }

    /// Write the snapshot to `path`.
    pub fn save_to_file(&self, path: &Path) -> std::io::Result<()> {
        let tmp = path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer_pretty(&mut writer, self)?;
            writer.flush()?;
        }
        fs::rename(&tmp, path)?;
        tracing::info!(
            path = %path.display(),
            users = self.users.len(),
            edges = self.edges.len(),
            "Saved snapshot"
        );
        Ok(())
    }
}
