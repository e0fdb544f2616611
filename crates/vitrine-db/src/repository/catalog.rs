//! # Catalog Repository
//!
//! Database operations for the remote catalog table.
//!
//! There is no optimistic concurrency here: `update` is last-writer-wins
//! and reports how many rows it touched, which may be zero.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use vitrine_core::CatalogEntry;

/// Row shape of `catalog_entries`.
#[derive(Debug, sqlx::FromRow)]
struct CatalogRow {
    id: String,
    title: String,
    description: String,
    image_url: String,
    whatsapp_message: String,
}

impl From<CatalogRow> for CatalogEntry {
    fn from(row: CatalogRow) -> Self {
        CatalogEntry {
            id: row.id,
            title: row.title,
            description: row.description,
            image: row.image_url,
            whatsapp_message: row.whatsapp_message,
        }
    }
}

/// Repository for catalog table operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.catalog();
/// repo.insert(&entry).await?;
/// let all = repo.list_all().await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Lists every entry, ordered by id.
    pub async fn list_all(&self) -> DbResult<Vec<CatalogEntry>> {
        let rows: Vec<CatalogRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, image_url, whatsapp_message
            FROM catalog_entries
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed catalog entries");
        Ok(rows.into_iter().map(CatalogEntry::from).collect())
    }

    /// Inserts a new entry.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - the id is already taken
    pub async fn insert(&self, entry: &CatalogEntry) -> DbResult<()> {
        debug!(id = %entry.id, "Inserting catalog entry");

        sqlx::query(
            r#"
            INSERT INTO catalog_entries (id, title, description, image_url, whatsapp_message)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.title)
        .bind(&entry.description)
        .bind(&entry.image)
        .bind(&entry.whatsapp_message)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("id", entry.id.clone()),
            other => other,
        })?;

        Ok(())
    }

    /// Overwrites the entry with `entry.id`. Returns rows affected.
    pub async fn update(&self, entry: &CatalogEntry) -> DbResult<u64> {
        debug!(id = %entry.id, "Updating catalog entry");

        let result = sqlx::query(
            r#"
            UPDATE catalog_entries
            SET title = ?2, description = ?3, image_url = ?4, whatsapp_message = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.title)
        .bind(&entry.description)
        .bind(&entry.image)
        .bind(&entry.whatsapp_message)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Deletes the entry with `id`. Returns rows affected.
    pub async fn delete(&self, id: &str) -> DbResult<u64> {
        debug!(id = %id, "Deleting catalog entry");

        let result = sqlx::query("DELETE FROM catalog_entries WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
