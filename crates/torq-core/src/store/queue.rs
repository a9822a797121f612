//! The durable admission backlog.

use anyhow::Result;
use sqlx::Row;

use super::db::Store;

impl Store {
    /// Append a hash to the backlog tail. No duplicate check; callers
    /// ensure the hash is not already queued or active.
    pub async fn enqueue(&self, hash: &str) -> Result<()> {
        sqlx::query("INSERT INTO queue (hash) VALUES (?1)")
            .bind(hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Pop the oldest backlog entry. The select and delete run in one
    /// transaction so an entry is delivered exactly once. Returns None for
    /// an empty backlog.
    pub async fn pop_first_queued(&self) -> Result<Option<String>> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(
            r#"
            SELECT seq, hash FROM queue
            ORDER BY seq ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&mut *tx)
        .await?;
        let Some(row) = row else {
            tx.commit().await?;
            return Ok(None);
        };
        let seq: i64 = row.get("seq");
        let hash: String = row.get("hash");
        sqlx::query("DELETE FROM queue WHERE seq = ?1")
            .bind(seq)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Some(hash))
    }

    /// Delete every backlog entry matching the hash. Returns the number of
    /// rows removed (normally 0 or 1).
    pub async fn remove_queued(&self, hash: &str) -> Result<u64> {
        let res = sqlx::query("DELETE FROM queue WHERE hash = ?1")
            .bind(hash)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    /// Backlog contents in admission order.
    pub async fn queued_hashes(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT hash FROM queue ORDER BY seq ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(|r| r.get("hash")).collect())
    }
}
