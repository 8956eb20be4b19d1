//! Identity persistence.
//!
//! This module provides the storage layer for identities:
//! - **traits**: the [`UserStore`] contract the authentication core depends
//!   on, plus the [`StoreProvider`] backend selector
//! - **sqlite**: the libsql-backed implementation (in-memory, local file, or
//!   remote Turso behind the `turso` feature)
//!
//! Stored identities carry the password digest and, when live, the SHA-256
//! digests of the session id and reset token. Raw tokens are never persisted.

// Relational database
pub mod sqlite;
pub mod traits;

// Re-exports
pub use sqlite::{SqliteStore, User};
pub use traits::{StoreProvider, UserChanges, UserLookup, UserStore};
