//! Follow-graph service library.
//!
//! The core is [`relationship::FollowService`], which toggles directed
//! follow edges between users. Everything around it (user directory, edge
//! storage, auth gate, HTTP transport) sits behind the types re-exported
//! here so the binaries and integration tests share one wiring.

pub mod config;
pub mod http;
pub mod auth;
pub mod directory;
pub mod graph;
pub mod relationship;
pub mod storage;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServiceConfig;
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
pub use relationship::{FollowError, FollowOutcome, FollowService, FollowState};
