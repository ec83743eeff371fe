//! SQLite-backed store.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};

use super::{poisoned, KeyValueStore};
use crate::LeetHelperResult;

/// Store backed by a single `kv` table in a SQLite database.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Creates or opens the database at `db_path`.
    pub fn open(db_path: &Path) -> LeetHelperResult<Self> {
        let conn = Connection::open(db_path)?;
        Self::init(conn)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> LeetHelperResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> LeetHelperResult<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
        "#,
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> LeetHelperResult<Option<String>> {
        let conn = self.conn.lock().map_err(poisoned)?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> LeetHelperResult<()> {
        let conn = self.conn.lock().map_err(poisoned)?;
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> LeetHelperResult<()> {
        let conn = self.conn.lock().map_err(poisoned)?;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn keys(&self) -> LeetHelperResult<Vec<String>> {
        let conn = self.conn.lock().map_err(poisoned)?;
        let mut stmt = conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }

    // LIKE would treat '_' in the prefix as a wildcard
    fn keys_with_prefix(&self, prefix: &str) -> LeetHelperResult<Vec<String>> {
        let conn = self.conn.lock().map_err(poisoned)?;
        let mut stmt = conn.prepare(
            "SELECT key FROM kv WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key",
        )?;
        let keys = stmt
            .query_map(params![prefix], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_and_remove() {
        let store = SqliteStore::open_in_memory().unwrap();

        store.set("key", "a").unwrap();
        store.set("key", "b").unwrap();
        assert_eq!(store.get("key").unwrap().as_deref(), Some("b"));

        store.remove("key").unwrap();
        store.remove("key").unwrap();
        assert!(store.get("key").unwrap().is_none());
    }

    #[test]
    fn test_prefix_underscore_is_literal() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.set("leethelper_two-sum", "{}").unwrap();
        store.set("leethelperXtwo-sum", "{}").unwrap();
        store.set("settings", "{}").unwrap();

        let keys = store.keys_with_prefix("leethelper_").unwrap();
        assert_eq!(keys, vec!["leethelper_two-sum".to_string()]);
        assert_eq!(store.keys().unwrap().len(), 3);
    }

    #[test]
    fn test_persists_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leethelper.db");

        SqliteStore::open(&path).unwrap().set("k", "v").unwrap();

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
