//! Identity store abstraction
//!
//! `UserStore` is the persistence contract the authentication core talks to.
//! `StoreProvider` picks which libsql backend an instance is built on:
//! ephemeral memory, a local file, or hosted Turso (behind the `turso`
//! feature).
//!
//! # Example
//!
//! ```rust,ignore
//! use gatehouse::db::{StoreProvider, UserLookup};
//!
//! let store = StoreProvider::from_env().create_store().await?;
//! let user = store.find_by(UserLookup::Email("bob@hbtn.io")).await?;
//! ```

use async_trait::async_trait;

use super::sqlite::SqliteStore;
use crate::types::Result;

/// Selects the backend an identity store is built on.
#[derive(Debug, Clone, Default)]
pub enum StoreProvider {
    /// Ephemeral in-process SQLite; the default for tests and development
    #[default]
    Memory,
    /// SQLite database at a local file path
    Sqlite {
        /// Location of the database file
        path: String,
    },
    /// Hosted Turso database reached over the network
    #[cfg(feature = "turso")]
    Turso {
        /// `libsql://` URL of the hosted database
        url: String,
        /// Token presented when connecting
        auth_token: String,
    },
}

impl StoreProvider {
    /// Construct the identity store this provider describes.
    pub async fn create_store(&self) -> Result<Box<dyn UserStore>> {
        match self {
            StoreProvider::Memory => Ok(Box::new(SqliteStore::new_memory().await?)),
            StoreProvider::Sqlite { path } => Ok(Box::new(SqliteStore::new_local(path).await?)),
            #[cfg(feature = "turso")]
            StoreProvider::Turso { url, auth_token } => Ok(Box::new(
                SqliteStore::new_remote(url.clone(), auth_token.clone()).await?,
            )),
        }
    }

    /// Derive a provider from the process environment.
    ///
    /// A complete Turso pair (`TURSO_DATABASE_URL` + `TURSO_AUTH_TOKEN`)
    /// takes precedence, then `DATABASE_PATH`; with neither set the store
    /// is in-memory.
    pub fn from_env() -> Self {
        #[cfg(feature = "turso")]
        {
            let url = std::env::var("TURSO_DATABASE_URL").unwrap_or_default();
            let token = std::env::var("TURSO_AUTH_TOKEN").unwrap_or_default();
            if !url.is_empty() && !token.is_empty() {
                return StoreProvider::Turso {
                    url,
                    auth_token: token,
                };
            }
        }

        match std::env::var("DATABASE_PATH") {
            // ":memory:" names the memory backend, not a file
            Ok(path) if !path.is_empty() && path != ":memory:" => StoreProvider::Sqlite { path },
            _ => StoreProvider::Memory,
        }
    }
}

/// Identity record, defined alongside the schema in the sqlite module.
pub use super::sqlite::User;

/// A lookup by one of the unique identity attributes.
///
/// Attribute names are closed over this enum, so a query against an unknown
/// attribute cannot be expressed.
#[derive(Debug, Clone, Copy)]
pub enum UserLookup<'a> {
    /// By primary id
    Id(&'a str),
    /// By unique email
    Email(&'a str),
    /// By stored session-id digest
    SessionId(&'a str),
    /// By stored reset-token digest
    ResetToken(&'a str),
}

impl<'a> UserLookup<'a> {
    /// Column name and match value for this lookup.
    pub fn column_value(&self) -> (&'static str, &'a str) {
        match *self {
            UserLookup::Id(value) => ("id", value),
            UserLookup::Email(value) => ("email", value),
            UserLookup::SessionId(value) => ("session_id", value),
            UserLookup::ResetToken(value) => ("reset_token", value),
        }
    }
}

/// Field changes applied by [`UserStore::update`]. Unset members leave the
/// column untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserChanges<'a> {
    /// New password digest
    pub hashed_password: Option<&'a str>,
    /// Session-id digest to set, or `Some(None)` to clear it
    pub session_id: Option<Option<&'a str>>,
    /// Reset-token digest to set, or `Some(None)` to clear it
    pub reset_token: Option<Option<&'a str>>,
}

/// Abstract trait for identity store operations
///
/// This trait defines all persistence operations the authentication core
/// needs. Implementations can use different backends (SQLite, Turso, etc.)
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new identity; fails with `Conflict` when the email is taken
    async fn create(&self, email: &str, hashed_password: &str) -> Result<User>;

    /// Look up an identity by a unique attribute; `Ok(None)` when no match
    async fn find_by(&self, lookup: UserLookup<'_>) -> Result<Option<User>>;

    /// Apply field changes; fails with `NotFound` when the id matches no identity
    async fn update(&self, user_id: &str, changes: UserChanges<'_>) -> Result<()>;
}

// ============== Implement UserStore for SqliteStore ==============

#[async_trait]
impl UserStore for SqliteStore {
    async fn create(&self, email: &str, hashed_password: &str) -> Result<User> {
        SqliteStore::create(self, email, hashed_password).await
    }

    async fn find_by(&self, lookup: UserLookup<'_>) -> Result<Option<User>> {
        SqliteStore::find_by(self, lookup).await
    }

    async fn update(&self, user_id: &str, changes: UserChanges<'_>) -> Result<()> {
        SqliteStore::update(self, user_id, changes).await
    }
}
