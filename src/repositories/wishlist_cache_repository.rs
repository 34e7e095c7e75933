// src/repositories/wishlist_cache_repository.rs
//
// Raw wishlist cache, one row per user.
//
// The cache holds the raw normalized payload exactly as the backend sent
// it, not the enriched entries. Row presence is meaningful: an absent row
// means "never fetched" while the sync layer deletes the row outright when
// the backend confirms an empty list. An empty JSON array is never stored.

use chrono::Utc;
use rusqlite::params;
use serde_json::Value;
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::UserId;
use crate::error::{AppError, AppResult};

pub trait WishlistCacheRepository: Send + Sync {
    fn store(&self, user: &UserId, raw_entries: &[Value]) -> AppResult<()>;
    fn load(&self, user: &UserId) -> AppResult<Option<Vec<Value>>>;
    fn remove(&self, user: &UserId) -> AppResult<()>;
    fn clear_all(&self) -> AppResult<()>;
}

pub struct SqliteWishlistCacheRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteWishlistCacheRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl WishlistCacheRepository for SqliteWishlistCacheRepository {
    fn store(&self, user: &UserId, raw_entries: &[Value]) -> AppResult<()> {
        let conn = self.pool.get()?;
        let entries_json = serde_json::to_string(raw_entries)?;

        conn.execute(
            "INSERT OR REPLACE INTO wishlist_cache (user_id, entries, updated_at)
             VALUES (?1, ?2, ?3)",
            params![user.as_str(), entries_json, Utc::now().to_rfc3339()],
        )?;

        Ok(())
    }

    fn load(&self, user: &UserId) -> AppResult<Option<Vec<Value>>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT entries FROM wishlist_cache WHERE user_id = ?1")?;

        let entries_json: Option<String> =
            match stmt.query_row(params![user.as_str()], |row| row.get(0)) {
                Ok(json) => Some(json),
                Err(rusqlite::Error::QueryReturnedNoRows) => None,
                Err(e) => return Err(AppError::Database(e)),
            };

        match entries_json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn remove(&self, user: &UserId) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "DELETE FROM wishlist_cache WHERE user_id = ?1",
            params![user.as_str()],
        )?;

        Ok(())
    }

    fn clear_all(&self) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM wishlist_cache", [])?;
        Ok(())
    }
}
