//! Authentication Strategies and Lifecycle
//!
//! This module provides the authentication infrastructure for the Gatehouse
//! API: pluggable request-authentication strategies and the service that
//! manages credentials, sessions, and password-reset tokens.
//!
//! # Module Structure
//!
//! - [`auth::strategy`](crate::auth::strategy) - The [`AuthStrategy`] contract and path exclusion rules
//! - [`auth::basic`](crate::auth::basic) - HTTP Basic authentication
//! - [`auth::session`](crate::auth::session) - Session-cookie authentication and session backends
//! - [`auth::service`](crate::auth::service) - Registration, login checks, and token lifecycle
//! - [`auth::crypto`](crate::auth::crypto) - Password hashing and token generation
//! - [`auth::middleware`](crate::auth::middleware) - Axum gate and extractors for protected routes
//!
//! # Security Features
//!
//! - **Password Hashing**: Uses Argon2id (memory-hard) for secure password storage
//! - **Opaque Tokens**: Session and reset tokens are UUIDv4; the store only
//!   ever sees their SHA-256 digests
//! - **Uniform Failures**: Strategies resolve to an identity or to nothing,
//!   never leaking which pipeline step failed
//!
//! # Usage
//!
//! ## Picking a Strategy
//!
//! ```ignore
//! use gatehouse::auth::session::{SessionAuth, StoreSessions};
//!
//! let sessions = Arc::new(StoreSessions::new(store.clone()));
//! let strategy = Arc::new(SessionAuth::new(store, sessions, "session_id"));
//! ```
//!
//! ## Gating Routes
//!
//! The gate runs in front of every route and skips the configured
//! exclusions:
//!
//! ```ignore
//! use gatehouse::auth::middleware::gate;
//!
//! let app = Router::new()
//!     .route("/profile", get(handler))
//!     .layer(middleware::from_fn(move |req, next| {
//!         gate(strategy.clone(), excluded.clone(), req, next)
//!     }));
//! ```
//!
//! ## Extracting the Identity in Handlers
//!
//! ```ignore
//! async fn profile(CurrentUser(user): CurrentUser) -> impl IntoResponse {
//!     Json(ProfileResponse { email: user.email })
//! }
//! ```
//!
//! # Configuration
//!
//! Configure via `gatehouse.toml`:
//! ```toml
//! [auth]
//! strategy = "session"          # none | base | basic | session
//! session_cookie = "session_id" # Cookie carrying the session id
//! ```

/// HTTP Basic authentication strategy.
pub mod basic;
/// Password hashing and opaque token primitives.
pub mod crypto;
/// Authentication middleware and extractors for protected routes.
pub mod middleware;
/// Credential registration and the session/reset-token lifecycle.
pub mod service;
/// Session-cookie strategy and session storage backends.
pub mod session;
/// The strategy contract shared by all authentication schemes.
pub mod strategy;

pub use basic::BasicAuth;
pub use middleware::{gate, CurrentUser};
pub use service::AuthService;
pub use session::{MemorySessions, SessionAuth, SessionBackend, StoreSessions};
pub use strategy::{AuthStrategy, NoAuth};
