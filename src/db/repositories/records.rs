use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::db::connection::Database;

/// Raw key/value access to the `records` table. Values are opaque text here;
/// typing and JSON parsing happen in `crate::store`.
impl Database {
    pub async fn get_record(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.execute(move |conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM records WHERE key = ?1",
                    params![key],
                    |row| row.get::<_, String>(0),
                )
                .optional()
                .with_context(|| format!("failed to read record {key}"))?;
            Ok(value)
        })
        .await
    }

    pub async fn put_record(&self, key: &str, value: String) -> Result<()> {
        let key = key.to_string();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO records (key, value, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .with_context(|| format!("failed to write record {key}"))?;
            Ok(())
        })
        .await
    }

    /// Writes every pair in one transaction: either all keys change or none do.
    pub async fn put_records(&self, entries: Vec<(String, String)>) -> Result<()> {
        self.execute(move |conn| {
            let tx = conn
                .transaction()
                .context("failed to open record transaction")?;
            let now = Utc::now().to_rfc3339();
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO records (key, value, updated_at)
                     VALUES (?1, ?2, ?3)
                     ON CONFLICT(key) DO UPDATE SET
                         value = excluded.value,
                         updated_at = excluded.updated_at",
                )?;
                for (key, value) in &entries {
                    stmt.execute(params![key, value, now])
                        .with_context(|| format!("failed to write record {key}"))?;
                }
            }
            tx.commit().context("failed to commit records")?;
            Ok(())
        })
        .await
    }

    pub async fn delete_all_records(&self) -> Result<usize> {
        self.execute(|conn| {
            let removed = conn
                .execute("DELETE FROM records", [])
                .context("failed to clear records")?;
            Ok(removed)
        })
        .await
    }
}
