//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for Gatehouse, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Status
//! - `GET /` - Welcome message
//! - `GET /api/status` - Service status
//!
//! ## Users (`/users`)
//! - `POST /users` - Register a new user
//!
//! ## Sessions (`/sessions`)
//! - `POST /sessions` - Login and receive a session cookie
//! - `DELETE /sessions` - Logout and destroy the session
//!
//! ## Profile (`/profile`)
//! - `GET /profile` - The authenticated user's profile
//!
//! ## Password Reset (`/reset_password`)
//! - `POST /reset_password` - Request a reset token
//! - `PUT /reset_password` - Update the password with a reset token
//!
//! # Authentication
//!
//! Requests are gated by the configured strategy. The session strategy reads
//! an opaque id from the session cookie:
//! ```text
//! Cookie: session_id=<id>
//! ```
//! The basic strategy reads credentials from the `Authorization` header:
//! ```text
//! Authorization: Basic <base64(email:password)>
//! ```
//! Lifecycle routes (registration, login, reset) are excluded from the gate.
//!
//! # OpenAPI Documentation
//!
//! When the `swagger-ui` feature is enabled, interactive API documentation
//! is available at `/swagger-ui/`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

use utoipa::OpenApi;

/// OpenAPI document for the Gatehouse API.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::status::index,
        handlers::status::status,
        handlers::users::register,
        handlers::sessions::login,
        handlers::sessions::logout,
        handlers::profile::profile,
        handlers::reset::request_reset,
        handlers::reset::update_password,
    ),
    components(schemas(
        crate::types::RegisterRequest,
        crate::types::LoginRequest,
        crate::types::ResetRequest,
        crate::types::UpdatePasswordRequest,
        crate::types::MessageResponse,
        crate::types::ProfileResponse,
        crate::types::ResetTokenResponse,
    )),
    tags(
        (name = "status", description = "Service status"),
        (name = "users", description = "User registration"),
        (name = "sessions", description = "Login and logout"),
        (name = "profile", description = "Authenticated profile"),
        (name = "reset", description = "Password reset")
    )
)]
pub struct ApiDoc;
