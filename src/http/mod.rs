//! HTTP transport subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (request ID, tracing, timeout, body limit)
//!     → auth::middleware (protected routes only)
//!     → routes.rs (extract, call FollowService / UserDirectory)
//!     → response.rs (errors → status + {"detail": ...})
//!     → Send to client
//! ```

pub mod response;
pub mod routes;
pub mod server;

pub use server::{AppState, HttpServer};
