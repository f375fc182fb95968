//! SQLite-backed key-value store for the persisted records.

use crate::core::store::KvStore;
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{OptionalExtension, params};
use tracing::warn;

pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Wrap an open database, running pending migrations first.
    pub fn new(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn open(path: &str) -> AppResult<Self> {
        Self::new(DbPool::new(path)?)
    }

    pub fn pool_mut(&mut self) -> &mut DbPool {
        &mut self.pool
    }

    /// Append an audit line. Failures are logged, never returned.
    pub fn audit(&self, operation: &str, target: &str, message: &str) {
        if let Err(e) = ttlog(&self.pool.conn, operation, target, message) {
            warn!(operation, error = %e, "failed to write internal log");
        }
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let value = self
            .pool
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.pool.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Local::now().to_rfc3339()],
        )?;
        Ok(())
    }
}
