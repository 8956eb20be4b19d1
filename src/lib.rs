//! # Gatehouse - Authentication Service
//!
//! A web authentication service built in Rust: credential registration,
//! login/logout with opaque session cookies, HTTP Basic gating, and
//! password-reset token flows, with pluggable request-authentication
//! strategies behind a single trait.
//!
//! ## Overview
//!
//! Gatehouse can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `gatehouse-server` binary
//! 2. **As a library** - Import the strategies and lifecycle service into
//!    your own Rust project
//!
//! ## Quick Start (Library Usage)
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! gatehouse-server = "0.3"
//! ```
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use gatehouse::auth::{AuthService, SessionAuth, StoreSessions};
//! use gatehouse::db::StoreProvider;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // In-memory identity store
//!     let store: Arc<dyn gatehouse::db::UserStore> =
//!         StoreProvider::Memory.create_store().await?.into();
//!
//!     // Sessions persisted on the identity record
//!     let sessions = Arc::new(StoreSessions::new(store.clone()));
//!     let auth = AuthService::new(store.clone(), sessions.clone());
//!
//!     // Register and log in
//!     auth.register("bob@hbtn.io", "toto1234").await?;
//!     assert!(auth.valid_login("bob@hbtn.io", "toto1234").await);
//!     let session_id = auth.create_session("bob@hbtn.io").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Gating Requests
//!
//! ```rust,ignore
//! use gatehouse::api::routes::create_router;
//! use gatehouse::auth::SessionAuth;
//! use std::sync::Arc;
//!
//! let strategy = Arc::new(SessionAuth::new(store, sessions, "session_id"));
//! let app = create_router(Some(strategy), excluded_paths).with_state(state);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `local-db` | Local SQLite database (default) |
//! | `turso` | Remote Turso database |
//! | `swagger-ui` | Interactive API documentation at `/swagger-ui/` |
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`auth`] - Authentication strategies, lifecycle service, middleware
//! - [`cli`] - Command-line interface for the server binary
//! - [`db`] - Identity store abstraction (SQLite, Turso)
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration loading
//!
//! ## Architecture
//!
//! Everything is wired explicitly at process start: the binary loads
//! `gatehouse.toml`, builds the identity store and session backend it names,
//! constructs the lifecycle service and the configured strategy from those,
//! and hands them to the router. No global state; tests assemble the same
//! pieces by hand.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Authentication strategies, session backends, and the lifecycle service.
pub mod auth;
/// Command-line interface for the server binary.
pub mod cli;
/// Identity store abstraction (SQLite, Turso).
pub mod db;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use auth::{AuthService, AuthStrategy, BasicAuth, NoAuth, SessionAuth, SessionBackend};
pub use db::{StoreProvider, User, UserStore};
pub use types::{AppError, Result};
pub use utils::config::{Config, SessionBackendKind, StrategyKind};

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Service configuration
    pub config: Arc<Config>,
    /// Identity store; the status route checks it answers
    pub store: Arc<dyn UserStore>,
    /// Credential and token lifecycle service
    pub auth: Arc<AuthService>,
}
