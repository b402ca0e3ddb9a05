//! Auth gate.
//!
//! # Data Flow
//! ```text
//! Authorization: Token <key>  (or Bearer <key>)
//!     → middleware.rs (extract key)
//!     → tokens.rs (key → UserId)
//!     → UserDirectory::get (UserId → User)
//!     → Actor inserted into request extensions
//! ```
//!
//! Requests without a valid key are rejected with 401 before any handler runs.

pub mod middleware;
pub mod tokens;

pub use middleware::{token_auth_middleware, Actor};
pub use tokens::TokenStore;
