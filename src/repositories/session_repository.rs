// src/repositories/session_repository.rs
//
// Durable session storage: token, refresh token and serialized user
// record, plus the admin back-office token in its own namespace.

use chrono::Utc;
use rusqlite::params;
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::error::{AppError, AppResult};

/// Storage namespace. The storefront session and the admin back-office
/// token are isolated from each other; clearing one never touches the
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreNamespace {
    User,
    Admin,
}

impl StoreNamespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreNamespace::User => "user",
            StoreNamespace::Admin => "admin",
        }
    }
}

/// Well-known keys within a namespace.
pub mod session_keys {
    pub const TOKEN: &str = "token";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const USER: &str = "user";
}

pub trait SessionRepository: Send + Sync {
    fn put(&self, namespace: StoreNamespace, key: &str, value: &str) -> AppResult<()>;
    fn get(&self, namespace: StoreNamespace, key: &str) -> AppResult<Option<String>>;
    fn delete(&self, namespace: StoreNamespace, key: &str) -> AppResult<()>;
    fn clear(&self, namespace: StoreNamespace) -> AppResult<()>;
}

pub struct SqliteSessionRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteSessionRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl SessionRepository for SqliteSessionRepository {
    fn put(&self, namespace: StoreNamespace, key: &str, value: &str) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT OR REPLACE INTO session_store (namespace, key, value, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![namespace.as_str(), key, value, Utc::now().to_rfc3339()],
        )?;

        Ok(())
    }

    fn get(&self, namespace: StoreNamespace, key: &str) -> AppResult<Option<String>> {
        let conn = self.pool.get()?;

        let mut stmt =
            conn.prepare("SELECT value FROM session_store WHERE namespace = ?1 AND key = ?2")?;

        match stmt.query_row(params![namespace.as_str(), key], |row| row.get(0)) {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn delete(&self, namespace: StoreNamespace, key: &str) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "DELETE FROM session_store WHERE namespace = ?1 AND key = ?2",
            params![namespace.as_str(), key],
        )?;

        Ok(())
    }

    fn clear(&self, namespace: StoreNamespace) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "DELETE FROM session_store WHERE namespace = ?1",
            params![namespace.as_str()],
        )?;

        Ok(())
    }
}
