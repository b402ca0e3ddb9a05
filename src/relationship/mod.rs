//! Relationship toggle subsystem.
//!
//! # Data Flow
//! ```text
//! authenticated actor + target username
//!     → UserDirectory::resolve   (unknown → NotFound)
//!     → self check               (same identity → InvalidOperation)
//!     → EdgeStore::toggle_edge   (present → removed, absent → added)
//!     → FollowOutcome { state, username }
//! ```
//!
//! The check order is fixed: target existence first, then the self check,
//! then membership. Failed checks never touch the edge set.

pub mod service;
pub mod types;

pub use service::FollowService;
pub use types::{FollowError, FollowOutcome, FollowState};
