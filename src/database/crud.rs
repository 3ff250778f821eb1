use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use super::MoodDatabase;
use crate::error::MoodResult;
use crate::store::KeyValueStore;

impl KeyValueStore for MoodDatabase {
    fn get(&self, key: &str) -> MoodResult<Option<String>> {
        let value = self
            .connection
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> MoodResult<()> {
        let now = Utc::now().to_rfc3339();

        self.connection.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;

        tracing::debug!(key, bytes = value.len(), "💾 Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> MoodResult<()> {
        self.connection
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }
}

impl MoodDatabase {
    /// 保存済みのキー一覧
    pub fn keys(&self) -> MoodResult<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare("SELECT key FROM kv_store ORDER BY key")?;
        let key_iter = stmt.query_map([], |row| row.get(0))?;

        let mut keys = Vec::new();
        for key in key_iter {
            keys.push(key?);
        }

        Ok(keys)
    }

    /// キーの最終更新時刻（RFC 3339）
    pub fn updated_at(&self, key: &str) -> MoodResult<Option<String>> {
        let updated_at = self
            .connection
            .query_row(
                "SELECT updated_at FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(updated_at)
    }
}
