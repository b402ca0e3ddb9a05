//! Startup orchestration.
//!
//! Builds the in-memory stores, restores the snapshot if one is configured,
//! and hands out the shared [`AppState`]. The same `Stores` value writes the
//! snapshot back on shutdown.

use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::TokenStore;
use crate::config::ServiceConfig;
use crate::directory::MemoryDirectory;
use crate::graph::MemoryEdgeStore;
use crate::http::AppState;
use crate::storage::Snapshot;

/// Concrete stores behind the service.
#[derive(Clone)]
pub struct Stores {
    pub directory: MemoryDirectory,
    pub tokens: TokenStore,
    pub edges: MemoryEdgeStore,
    snapshot_path: Option<PathBuf>,
}

impl Stores {
    /// Empty stores, ignoring any configured snapshot.
    pub fn empty(config: &ServiceConfig) -> Self {
        Self {
            directory: MemoryDirectory::new(config.directory.clone()),
            tokens: TokenStore::new(),
            edges: MemoryEdgeStore::new(),
            snapshot_path: config.storage.snapshot_path.as_ref().map(PathBuf::from),
        }
    }

    /// Stores restored from the configured snapshot, if present.
    pub fn load(config: &ServiceConfig) -> std::io::Result<Self> {
        let stores = Self::empty(config);
        if let Some(path) = &stores.snapshot_path {
            if let Some(snapshot) = Snapshot::load_from_file(path)? {
                snapshot.restore_into(&stores.directory, &stores.tokens, &stores.edges);
            }
        }
        Ok(stores)
    }

    /// Write the snapshot, if a path is configured.
    pub fn persist(&self) -> std::io::Result<()> {
        match &self.snapshot_path {
            Some(path) => Snapshot::capture(&self.directory, &self.tokens, &self.edges).save_to_file(path),
            None => Ok(()),
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState::new(
            Arc::new(self.directory.clone()),
            Arc::new(self.edges.clone()),
            Arc::new(self.tokens.clone()),
        )
    }
}
