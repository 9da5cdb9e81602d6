//! SQLite-backed key-value store.
//!
//! The embedded database keeps the same string-key/JSON-value layout as the
//! in-memory store, in a single `kv` table. The `log` table next to it holds
//! applied schema migrations and the audit trail written by `log::ttlog`.

pub mod log;
mod migrate;
pub mod pool;

pub use migrate::run_pending_migrations;

use crate::errors::AppResult;
use crate::kv::{KvStore, StorageResult};
use chrono::Utc;
use pool::DbPool;
use rusqlite::{Connection, OptionalExtension, params};

pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Open (or create) the database file and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        run_pending_migrations(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn open_in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        run_pending_migrations(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    pub fn path(&self) -> Option<&str> {
        self.pool.path()
    }

    /// Timestamp of the last write to `key`.
    pub fn updated_at(&self, key: &str) -> StorageResult<Option<String>> {
        let ts = self
            .pool
            .conn
            .query_row("SELECT updated_at FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(ts)
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .pool
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let mut stmt = self.pool.conn.prepare_cached(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )?;
        stmt.execute(params![key, value, now])?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.pool
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(())
    }

    fn keys(&self, prefix: Option<&str>) -> StorageResult<Vec<String>> {
        let mut keys = Vec::new();

        match prefix {
            Some(p) => {
                let mut stmt = self
                    .pool
                    .conn
                    .prepare_cached("SELECT key FROM kv WHERE substr(key, 1, length(?1)) = ?1")?;
                let rows = stmt.query_map([p], |row| row.get::<_, String>(0))?;
                for r in rows {
                    keys.push(r?);
                }
            }
            None => {
                let mut stmt = self.pool.conn.prepare_cached("SELECT key FROM kv")?;
                let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
                for r in rows {
                    keys.push(r?);
                }
            }
        }

        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_overwrite_remove() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
        assert!(store.updated_at("a").unwrap().is_some());

        store.remove("a").unwrap();
        assert!(store.get("a").unwrap().is_none());
        store.remove("a").unwrap();
    }

    #[test]
    fn keys_with_prefix() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.set("schedule_x_DOMINGO", "{}").unwrap();
        store.set("saved_sectors_registry", "{}").unwrap();
        store.set("bishop-company-data", "{}").unwrap();

        assert_eq!(
            store.keys(Some("schedule_")).unwrap(),
            vec!["schedule_x_DOMINGO".to_string()]
        );
        assert_eq!(store.keys(None).unwrap().len(), 3);
        assert_eq!(store.keys(Some("")).unwrap().len(), 3);
        assert!(store.keys(Some("bishopdb_")).unwrap().is_empty());
    }
}
