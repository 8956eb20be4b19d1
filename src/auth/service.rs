use crate::auth::crypto;
use crate::auth::session::SessionBackend;
use crate::db::{User, UserChanges, UserLookup, UserStore};
use crate::types::{AppError, Result};
use std::sync::Arc;

/// Authentication service for credential registration and the session and
/// reset-token lifecycle.
///
/// Strategies answer "who is this request from" and swallow failures into
/// absence; this service owns the mutations and reports failures as typed
/// errors for handlers to map onto responses.
pub struct AuthService {
    store: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionBackend>,
}

impl AuthService {
    /// Creates a new AuthService over an identity store and session backend.
    ///
    /// # Arguments
    /// * `store` - Identity records
    /// * `sessions` - Live session mappings; share the instance with the
    ///   session strategy so issued cookies resolve at the gate
    pub fn new(store: Arc<dyn UserStore>, sessions: Arc<dyn SessionBackend>) -> Self {
        Self { store, sessions }
    }

    /// Registers a new identity from an email and plaintext password.
    ///
    /// The password is hashed before it reaches the store. Fails with
    /// [`AppError::Conflict`] when the email is already registered.
    pub async fn register(&self, email: &str, password: &str) -> Result<User> {
        if self.store.find_by(UserLookup::Email(email)).await?.is_some() {
            return Err(AppError::Conflict("email already registered".to_string()));
        }

        let hashed = crypto::hash_password(password)?;
        self.store.create(email, &hashed).await
    }

    /// Checks a login attempt; false for unknown emails, wrong passwords,
    /// and store failures alike.
    pub async fn valid_login(&self, email: &str, password: &str) -> bool {
        match self.store.find_by(UserLookup::Email(email)).await {
            Ok(Some(user)) => crypto::verify_password(password, &user.hashed_password),
            _ => false,
        }
    }

    /// Issues a session id for the identity registered under an email.
    ///
    /// Returns `Ok(None)` when the email is unknown. Callers validate the
    /// password first; this only mints the session.
    pub async fn create_session(&self, email: &str) -> Result<Option<String>> {
        let Some(user) = self.store.find_by(UserLookup::Email(email)).await? else {
            return Ok(None);
        };

        let session_id = crypto::generate_token();
        self.sessions.insert(&session_id, &user.id).await?;

        Ok(Some(session_id))
    }

    /// Resolves a session id to the identity it was issued for.
    pub async fn user_from_session(&self, session_id: &str) -> Option<User> {
        let user_id = self.sessions.lookup(session_id).await.ok()??;

        self.store.find_by(UserLookup::Id(&user_id)).await.ok()?
    }

    /// Destroys every live session held by an identity.
    pub async fn destroy_session(&self, user_id: &str) -> Result<()> {
        self.sessions.remove_user(user_id).await
    }

    /// Issues a password-reset token for an email.
    ///
    /// Only the token's digest is stored; the returned plaintext is the one
    /// chance to deliver it. Issuing again replaces the previous token.
    pub async fn request_password_reset(&self, email: &str) -> Result<String> {
        let Some(user) = self.store.find_by(UserLookup::Email(email)).await? else {
            return Err(AppError::NotFound("unknown email".to_string()));
        };

        let token = crypto::generate_token();
        let digest = crypto::hash_token(&token);
        self.store
            .update(
                &user.id,
                UserChanges {
                    reset_token: Some(Some(&digest)),
                    ..Default::default()
                },
            )
            .await?;

        Ok(token)
    }

    /// Sets a new password for the identity holding a reset token.
    ///
    /// The token is consumed whether or not it is ever used again; a second
    /// update with the same token fails with [`AppError::NotFound`].
    pub async fn update_password(&self, reset_token: &str, new_password: &str) -> Result<()> {
        let digest = crypto::hash_token(reset_token);
        let Some(user) = self
            .store
            .find_by(UserLookup::ResetToken(&digest))
            .await?
        else {
            return Err(AppError::NotFound("invalid reset token".to_string()));
        };

        let hashed = crypto::hash_password(new_password)?;
        self.store
            .update(
                &user.id,
                UserChanges {
                    hashed_password: Some(&hashed),
                    reset_token: Some(None),
                    ..Default::default()
                },
            )
            .await
    }
}
