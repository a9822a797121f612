//! Torrent record CRUD.

use anyhow::{anyhow, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::torrent::{Status, TorrentInfo};

use super::db::Store;

fn row_to_info(row: &SqliteRow) -> Result<TorrentInfo> {
    let status_str: String = row.get("status");
    let status = Status::from_str(&status_str)
        .ok_or_else(|| anyhow!("unknown torrent status {status_str:?} in store"))?;
    Ok(TorrentInfo {
        hash: row.get("hash"),
        name: row.get("name"),
        magnet: row.get("magnet"),
        total_bytes: row.get("total_bytes"),
        status,
        label_id: row.get("label_id"),
        time_added: row.get("time_added"),
    })
}

impl Store {
    /// Insert or replace a torrent record (upsert keyed by hash).
    pub async fn put_torrent(&self, info: &TorrentInfo) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO torrents (
                hash, name, magnet, total_bytes, status, label_id, time_added
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&info.hash)
        .bind(&info.name)
        .bind(&info.magnet)
        .bind(info.total_bytes)
        .bind(info.status.as_str())
        .bind(&info.label_id)
        .bind(info.time_added)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_torrent(&self, hash: &str) -> Result<Option<TorrentInfo>> {
        let row = sqlx::query(
            r#"
            SELECT hash, name, magnet, total_bytes, status, label_id, time_added
            FROM torrents
            WHERE hash = ?1
            "#,
        )
        .bind(hash)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_info).transpose()
    }

    /// All torrent records, oldest first.
    pub async fn all_torrents(&self) -> Result<Vec<TorrentInfo>> {
        let rows = sqlx::query(
            r#"
            SELECT hash, name, magnet, total_bytes, status, label_id, time_added
            FROM torrents
            ORDER BY time_added ASC, hash ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_info).collect()
    }

    /// Records carrying the given label (for cascading unset on label
    /// delete).
    pub async fn torrents_with_label(&self, label_id: &str) -> Result<Vec<TorrentInfo>> {
        let rows = sqlx::query(
            r#"
            SELECT hash, name, magnet, total_bytes, status, label_id, time_added
            FROM torrents
            WHERE label_id = ?1
            "#,
        )
        .bind(label_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_info).collect()
    }

    /// Remove a torrent record. Returns false if no such record existed.
    pub async fn delete_torrent(&self, hash: &str) -> Result<bool> {
        let res = sqlx::query("DELETE FROM torrents WHERE hash = ?1")
            .bind(hash)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
