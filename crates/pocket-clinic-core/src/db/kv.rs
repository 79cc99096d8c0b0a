//! Key-value operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult};

/// Storage seam used by the stores.
///
/// Values are opaque strings; collections are stored as JSON arrays.
/// `put_batch` must be all-or-nothing.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> DbResult<Option<String>>;

    /// Write several entries atomically.
    fn put_batch(&mut self, entries: &[(&str, &str)]) -> DbResult<()>;

    /// Write a single entry.
    fn put(&mut self, key: &str, value: &str) -> DbResult<()> {
        self.put_batch(&[(key, value)])
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    fn put_batch(&mut self, entries: &[(&str, &str)]) -> DbResult<()> {
        let tx = self.transaction()?;
        for (key, value) in entries {
            tx.execute(
                r#"
                INSERT INTO kv_store (key, value, updated_at)
                VALUES (?1, ?2, datetime('now'))
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                "#,
                params![key, value],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}
