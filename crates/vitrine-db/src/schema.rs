//! # Schema Bootstrap
//!
//! Creates the two tables this crate needs if they are missing. There is no
//! migration history; the statements are idempotent and run on every start.
//!
//! ```text
//! catalog_entries                      kv_store
//! ───────────────                      ────────
//! id TEXT PRIMARY KEY                  key TEXT PRIMARY KEY
//! title TEXT NOT NULL                  value TEXT NOT NULL
//! description TEXT NOT NULL            updated_at TEXT NOT NULL
//! image_url TEXT NOT NULL
//! whatsapp_message TEXT NOT NULL
//! ```

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

const CREATE_CATALOG_ENTRIES: &str = r#"
CREATE TABLE IF NOT EXISTS catalog_entries (
    id               TEXT PRIMARY KEY NOT NULL,
    title            TEXT NOT NULL,
    description      TEXT NOT NULL,
    image_url        TEXT NOT NULL,
    whatsapp_message TEXT NOT NULL
)
"#;

const CREATE_KV_STORE: &str = r#"
CREATE TABLE IF NOT EXISTS kv_store (
    key        TEXT PRIMARY KEY NOT NULL,
    value      TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
"#;

/// Creates missing tables.
pub async fn ensure_schema(pool: &SqlitePool) -> DbResult<()> {
    info!("Ensuring database schema");

    for statement in [CREATE_CATALOG_ENTRIES, CREATE_KV_STORE] {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.ensure_schema().await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert_eq!(names, vec!["catalog_entries", "kv_store"]);
    }
}
