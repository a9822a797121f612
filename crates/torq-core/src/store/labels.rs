//! Label CRUD.

use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::label::Label;

use super::db::Store;

fn row_to_label(row: &SqliteRow) -> Label {
    Label {
        id: row.get("id"),
        name: row.get("name"),
        color: row.get("color"),
        move_to: row.get("move_to"),
    }
}

impl Store {
    pub async fn put_label(&self, label: &Label) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO labels (id, name, color, move_to)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&label.id)
        .bind(&label.name)
        .bind(&label.color)
        .bind(&label.move_to)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_label(&self, id: &str) -> Result<Option<Label>> {
        let row = sqlx::query("SELECT id, name, color, move_to FROM labels WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_label))
    }

    pub async fn all_labels(&self) -> Result<Vec<Label>> {
        let rows = sqlx::query("SELECT id, name, color, move_to FROM labels ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(row_to_label).collect())
    }

    /// Remove a label row. Returns false if no such label existed. The
    /// cascading unset of referencing torrents happens at the command
    /// layer.
    pub async fn delete_label(&self, id: &str) -> Result<bool> {
        let res = sqlx::query("DELETE FROM labels WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
