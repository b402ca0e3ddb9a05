//! Follow-edge storage subsystem.
//!
//! # Data Flow
//! ```text
//! FollowService::toggle_follow
//!     → Edge::new (rejects self-edges)
//!     → EdgeStore::toggle_edge (atomic flip of one ordered pair)
//!     → EdgeChange::{Added, Removed}
//! ```
//!
//! # Invariants
//! - No edge has `follower == followee` (enforced by `Edge` construction)
//! - At most one edge per ordered pair (set semantics)

pub mod edge;
pub mod memory;
pub mod store;

pub use edge::{Edge, SelfEdge};
pub use memory::MemoryEdgeStore;
pub use store::{EdgeChange, EdgeStore};
