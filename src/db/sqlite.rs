use crate::types::{AppError, Result};
use chrono::Utc;
use libsql::{Builder, Connection, Database};

use super::traits::{UserChanges, UserLookup};

pub struct SqliteStore {
    // One connection shared by every operation: libsql opens a fresh private
    // database on each `Database::connect()` when the path is `:memory:`, so
    // the store must keep the connection its schema was initialized on.
    conn: Connection,
}

impl SqliteStore {
    /// In-memory store; state is lost when the store is dropped.
    pub async fn new_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open in-memory database: {}", e)))?;

        let store = Self::from_database(&db)?;
        store.initialize_schema().await?;

        Ok(store)
    }

    /// File-backed store at `path`.
    pub async fn new_local(path: &str) -> Result<Self> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database {}: {}", path, e)))?;

        let store = Self::from_database(&db)?;
        store.initialize_schema().await?;

        Ok(store)
    }

    /// Remote Turso store.
    pub async fn new_remote(url: String, auth_token: String) -> Result<Self> {
        let db = Builder::new_remote(url, auth_token)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Turso: {}", e)))?;

        let store = Self::from_database(&db)?;
        store.initialize_schema().await?;

        Ok(store)
    }

    fn from_database(db: &Database) -> Result<Self> {
        let conn = db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))?;

        Ok(Self { conn })
    }

    pub fn connection(&self) -> Result<Connection> {
        Ok(self.conn.clone())
    }

    async fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                hashed_password TEXT NOT NULL,
                session_id TEXT,
                reset_token TEXT,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create users table: {}", e)))?;

        // Session and reset lookups run per request; keep them indexed.
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_users_session_id ON users(session_id)",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create session index: {}", e)))?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_users_reset_token ON users(reset_token)",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create reset token index: {}", e)))?;

        Ok(())
    }

    // User operations
    pub async fn create(&self, email: &str, hashed_password: &str) -> Result<User> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();
        let id = uuid::Uuid::new_v4().to_string();

        conn.execute(
            "INSERT INTO users (id, email, hashed_password, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            (id.as_str(), email, hashed_password, now, now),
        )
        .await
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE constraint failed") {
                AppError::Conflict("email already registered".to_string())
            } else {
                AppError::Database(format!("Failed to create user: {}", msg))
            }
        })?;

        Ok(User {
            id,
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
            session_id: None,
            reset_token: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn find_by(&self, lookup: UserLookup<'_>) -> Result<Option<User>> {
        let (column, value) = lookup.column_value();
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                &format!(
                    "SELECT id, email, hashed_password, session_id, reset_token,
                            created_at, updated_at
                     FROM users WHERE {} = ?",
                    column
                ),
                [value],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query user: {}", e)))?;

        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Ok(Some(Self::row_to_user(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn update(&self, user_id: &str, changes: UserChanges<'_>) -> Result<()> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();

        let mut assignments = vec!["updated_at = ?".to_string()];
        let mut params = vec![libsql::Value::Integer(now)];

        if let Some(hash) = changes.hashed_password {
            assignments.push("hashed_password = ?".to_string());
            params.push(libsql::Value::Text(hash.to_string()));
        }
        if let Some(session_id) = changes.session_id {
            assignments.push("session_id = ?".to_string());
            params.push(text_or_null(session_id));
        }
        if let Some(reset_token) = changes.reset_token {
            assignments.push("reset_token = ?".to_string());
            params.push(text_or_null(reset_token));
        }
        params.push(libsql::Value::Text(user_id.to_string()));

        let affected = conn
            .execute(
                &format!("UPDATE users SET {} WHERE id = ?", assignments.join(", ")),
                params,
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to update user: {}", e)))?;

        if affected == 0 {
            return Err(AppError::NotFound(format!("user not found: {}", user_id)));
        }

        Ok(())
    }

    fn row_to_user(row: &libsql::Row) -> Result<User> {
        Ok(User {
            id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
            email: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
            hashed_password: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
            session_id: optional_text(row, 3)?,
            reset_token: optional_text(row, 4)?,
            created_at: row.get(5).map_err(|e| AppError::Database(e.to_string()))?,
            updated_at: row.get(6).map_err(|e| AppError::Database(e.to_string()))?,
        })
    }
}

fn text_or_null(value: Option<&str>) -> libsql::Value {
    match value {
        Some(text) => libsql::Value::Text(text.to_string()),
        None => libsql::Value::Null,
    }
}

fn optional_text(row: &libsql::Row, idx: i32) -> Result<Option<String>> {
    match row
        .get_value(idx)
        .map_err(|e| AppError::Database(e.to_string()))?
    {
        libsql::Value::Text(value) => Ok(Some(value)),
        libsql::Value::Null => Ok(None),
        other => Err(AppError::Database(format!(
            "Unexpected column type: {:?}",
            other
        ))),
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub hashed_password: String,
    pub session_id: Option<String>,
    pub reset_token: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}
