//! The polymorphic authentication contract.
//!
//! Every gate variant (no-op, HTTP Basic, session cookie) implements
//! [`AuthStrategy`]. The trait carries the shared request-inspection logic as
//! provided methods; variants only override identity resolution (and, for the
//! cookie strategy, the cookie name).

use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use axum_extra::extract::cookie::Cookie;

use crate::db::User;

/// A pluggable per-request authentication scheme.
///
/// Failures at this layer are uniformly absence: a strategy never errors, it
/// just resolves no identity.
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    /// Whether `path` requires authentication given the exclusion list.
    ///
    /// False only when the path, normalized with a trailing slash, exactly
    /// matches a (likewise normalized) excluded entry. An absent or empty
    /// path, or an empty list, always requires auth.
    fn require_auth(&self, path: Option<&str>, excluded_paths: &[String]) -> bool {
        let Some(path) = path else { return true };
        if path.is_empty() || excluded_paths.is_empty() {
            return true;
        }

        let path = normalize(path);
        !excluded_paths
            .iter()
            .any(|excluded| normalize(excluded) == path)
    }

    /// The `Authorization` header value, if the request carries a readable one.
    fn authorization_header<'h>(&self, headers: Option<&'h HeaderMap>) -> Option<&'h str> {
        headers?.get(header::AUTHORIZATION)?.to_str().ok()
    }

    /// Name of the cookie this strategy reads its session from, if any.
    fn cookie_name(&self) -> Option<&str> {
        None
    }

    /// Value of the strategy's session cookie, when the strategy has one and
    /// the request carries it.
    fn session_cookie(&self, headers: Option<&HeaderMap>) -> Option<String> {
        let name = self.cookie_name()?;
        let raw = headers?.get(header::COOKIE)?.to_str().ok()?;

        Cookie::split_parse(raw)
            .filter_map(|cookie| cookie.ok())
            .find(|cookie| cookie.name() == name)
            .map(|cookie| cookie.value().to_string())
    }

    /// Resolves the request to an identity. The default resolves nothing.
    async fn current_user(&self, headers: Option<&HeaderMap>) -> Option<User> {
        let _ = headers;
        None
    }
}

fn normalize(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}/", path)
    }
}

/// The no-op base strategy: every path requires auth and no request ever
/// resolves to an identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

#[async_trait]
impl AuthStrategy for NoAuth {}
