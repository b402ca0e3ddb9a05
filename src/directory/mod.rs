//! User directory subsystem.
//!
//! # Responsibilities
//! - Resolve usernames to user identities (single fallible call)
//! - Register new users with unique, well-formed usernames
//! - Hold per-user profile fields (bio)
//!
//! # Design Decisions
//! - The directory is a trait so the follow service can run against any
//!   backing store; `MemoryDirectory` is the in-process implementation
//! - Usernames are case-sensitive and unique

pub mod memory;
pub mod user;

pub use memory::MemoryDirectory;
pub use user::{DirectoryError, User, UserDirectory, UserId};
