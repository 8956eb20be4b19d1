//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Authenticated profile handler.
pub mod profile;
/// Password-reset request and update handlers.
pub mod reset;
/// Login and logout handlers.
pub mod sessions;
/// Index and service-status handlers.
pub mod status;
/// User registration handlers.
pub mod users;
