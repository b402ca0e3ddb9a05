//! Snapshot persistence for the in-memory stores.

pub mod snapshot;

pub use snapshot::Snapshot;
