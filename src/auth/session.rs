//! Session-cookie authentication strategy and session storage.
//!
//! Live sessions are `session-id -> user-id` mappings behind the
//! [`SessionBackend`] trait, injected at construction. Two backends ship:
//!
//! - [`MemorySessions`]: a process-local map. The reference behavior of the
//!   cookie strategy; everything is lost on restart, and issuing a new
//!   session does not displace an identity's earlier ones.
//! - [`StoreSessions`]: the token-service style. The digest of the live
//!   token is a column on the identity row, so each identity holds at most
//!   one session and a new login replaces the old.
//!
//! The lifecycle service shares the same backend instance, so sessions it
//! issues are resolvable by this strategy.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderMap;
use parking_lot::RwLock;

use crate::auth::crypto;
use crate::auth::strategy::AuthStrategy;
use crate::db::{User, UserChanges, UserLookup, UserStore};
use crate::types::Result;

/// Storage for live session-id to user-id mappings.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Records a session for an identity.
    async fn insert(&self, session_id: &str, user_id: &str) -> Result<()>;

    /// Resolves a session id to its user id.
    async fn lookup(&self, session_id: &str) -> Result<Option<String>>;

    /// Removes one session; false when the id was not mapped.
    async fn remove(&self, session_id: &str) -> Result<bool>;

    /// Clears every session held by an identity; a no-op when it holds none.
    async fn remove_user(&self, user_id: &str) -> Result<()>;
}

/// Process-local session table.
#[derive(Default)]
pub struct MemorySessions {
    sessions: RwLock<HashMap<String, String>>,
}

impl MemorySessions {
    /// Create an empty session map.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionBackend for MemorySessions {
    async fn insert(&self, session_id: &str, user_id: &str) -> Result<()> {
        self.sessions
            .write()
            .insert(session_id.to_string(), user_id.to_string());
        Ok(())
    }

    async fn lookup(&self, session_id: &str) -> Result<Option<String>> {
        Ok(self.sessions.read().get(session_id).cloned())
    }

    async fn remove(&self, session_id: &str) -> Result<bool> {
        Ok(self.sessions.write().remove(session_id).is_some())
    }

    async fn remove_user(&self, user_id: &str) -> Result<()> {
        self.sessions.write().retain(|_, uid| uid != user_id);
        Ok(())
    }
}

/// Sessions persisted on the identity record.
pub struct StoreSessions {
    store: Arc<dyn UserStore>,
}

impl StoreSessions {
    /// Back sessions by the given identity store.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SessionBackend for StoreSessions {
    async fn insert(&self, session_id: &str, user_id: &str) -> Result<()> {
        let digest = crypto::hash_token(session_id);
        self.store
            .update(
                user_id,
                UserChanges {
                    session_id: Some(Some(&digest)),
                    ..Default::default()
                },
            )
            .await
    }

    async fn lookup(&self, session_id: &str) -> Result<Option<String>> {
        let digest = crypto::hash_token(session_id);
        Ok(self
            .store
            .find_by(UserLookup::SessionId(&digest))
            .await?
            .map(|user| user.id))
    }

    async fn remove(&self, session_id: &str) -> Result<bool> {
        let digest = crypto::hash_token(session_id);
        match self.store.find_by(UserLookup::SessionId(&digest)).await? {
            Some(user) => {
                self.store
                    .update(
                        &user.id,
                        UserChanges {
                            session_id: Some(None),
                            ..Default::default()
                        },
                    )
                    .await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_user(&self, user_id: &str) -> Result<()> {
        match self.store.find_by(UserLookup::Id(user_id)).await? {
            Some(user) if user.session_id.is_some() => {
                self.store
                    .update(
                        user_id,
                        UserChanges {
                            session_id: Some(None),
                            ..Default::default()
                        },
                    )
                    .await
            }
            _ => Ok(()),
        }
    }
}

/// Authenticates requests from an opaque session cookie.
pub struct SessionAuth {
    store: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionBackend>,
    cookie_name: String,
}

impl SessionAuth {
    /// Build the strategy from its store, session backend, and cookie name.
    pub fn new(
        store: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionBackend>,
        cookie_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            sessions,
            cookie_name: cookie_name.into(),
        }
    }

    /// Issues a session id for an identity; None for an absent or empty id.
    pub async fn create_session(&self, user_id: Option<&str>) -> Option<String> {
        let user_id = user_id?;
        if user_id.is_empty() {
            return None;
        }

        let session_id = crypto::generate_token();
        self.sessions.insert(&session_id, user_id).await.ok()?;

        Some(session_id)
    }

    /// Resolves a session id to the identity id it was issued for.
    pub async fn user_id_for_session(&self, session_id: Option<&str>) -> Option<String> {
        self.sessions.lookup(session_id?).await.ok()?
    }

    /// Destroys the session named by the request's cookie.
    ///
    /// False, with nothing mutated, when headers are absent, the cookie is
    /// absent, or the session id is unmapped. Destroying twice reports false
    /// the second time.
    pub async fn destroy_session(&self, headers: Option<&HeaderMap>) -> bool {
        let Some(session_id) = self.session_cookie(headers) else {
            return false;
        };

        self.sessions.remove(&session_id).await.unwrap_or(false)
    }
}

#[async_trait]
impl AuthStrategy for SessionAuth {
    fn cookie_name(&self) -> Option<&str> {
        Some(&self.cookie_name)
    }

    async fn current_user(&self, headers: Option<&HeaderMap>) -> Option<User> {
        let session_id = self.session_cookie(headers)?;
        let user_id = self.user_id_for_session(Some(&session_id)).await?;

        self.store.find_by(UserLookup::Id(&user_id)).await.ok()?
    }
}
