//! HTTP Basic authentication strategy.
//!
//! Resolves `Authorization: Basic <base64(email:password)>` headers against
//! the identity store. Every malformed input reads as "no identity"; this
//! strategy never reports why a request failed.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderMap;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::auth::crypto;
use crate::auth::strategy::AuthStrategy;
use crate::db::{User, UserLookup, UserStore};

/// Authenticates requests from Basic authorization headers.
pub struct BasicAuth {
    store: Arc<dyn UserStore>,
}

impl BasicAuth {
    /// Build the strategy over an identity store.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Returns the base64 payload of a Basic authorization header.
    ///
    /// The literal `"Basic "` prefix is required; anything else is not this
    /// scheme.
    pub fn extract_base64_token<'h>(&self, header: Option<&'h str>) -> Option<&'h str> {
        header?.strip_prefix("Basic ")
    }

    /// Decodes the base64 payload into credential text.
    pub fn decode_token(&self, token: &str) -> Option<String> {
        let bytes = STANDARD.decode(token).ok()?;
        String::from_utf8(bytes).ok()
    }

    /// Splits decoded credentials into (email, password).
    ///
    /// Splits on the first `:` only; passwords may contain colons. Empty
    /// components are rejected.
    pub fn extract_credentials(&self, decoded: &str) -> Option<(String, String)> {
        let (email, password) = decoded.split_once(':')?;
        if email.is_empty() || password.is_empty() {
            return None;
        }

        Some((email.to_string(), password.to_string()))
    }

    /// Looks the email up in the store and verifies the password.
    pub async fn resolve_user(&self, email: &str, password: &str) -> Option<User> {
        let user = self.store.find_by(UserLookup::Email(email)).await.ok()??;

        if crypto::verify_password(password, &user.hashed_password) {
            Some(user)
        } else {
            None
        }
    }
}

#[async_trait]
impl AuthStrategy for BasicAuth {
    async fn current_user(&self, headers: Option<&HeaderMap>) -> Option<User> {
        let header = self.authorization_header(headers)?;
        let token = self.extract_base64_token(Some(header))?;
        let decoded = self.decode_token(token)?;
        let (email, password) = self.extract_credentials(&decoded)?;

        self.resolve_user(&email, &password).await
    }
}
