//! # Key-Value Persistence
//!
//! Small string-keyed store used by the storefront for its two documents:
//! the product collection and the hero config. Each key holds one JSON
//! document that is rewritten whole on every save.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  KeyValueStore (trait)                                                  │
//! │  ├── JsonFileStore   <data_dir>/<key>.json, temp file + rename          │
//! │  ├── SqliteKvStore   kv_store table, upsert per key                     │
//! │  └── MemoryStore     HashMap, optional byte quota (tests, demos)        │
//! │                                                                         │
//! │  JsonSlot<T> ── one key + serde ──► load() -> Option<T> / save(&T)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};

// =============================================================================
// Trait
// =============================================================================

/// String-keyed document storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written.
    async fn get(&self, key: &str) -> DbResult<Option<String>>;

    /// Replaces the value under `key`.
    async fn put(&self, key: &str, value: String) -> DbResult<()>;
}

// =============================================================================
// JSON File Backend
// =============================================================================

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Opens (and creates if needed) the data directory.
    pub async fn open(root: impl Into<PathBuf>) -> DbResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        debug!(root = %root.display(), "Opened JSON file store");
        Ok(JsonFileStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> DbResult<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(DbError::Internal(format!("invalid storage key: {key:?}")));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, value: String) -> DbResult<()> {
        let path = self.key_path(key)?;

        // Temp file + rename so a crash never leaves a half-written document
        let temp_path = self.root.join(format!(".{key}.json.tmp.{}", Uuid::new_v4()));
        if let Err(e) = write_then_rename(&temp_path, &path, value.as_bytes()).await {
            if let Err(cleanup) = fs::remove_file(&temp_path).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %temp_path.display(), error = %cleanup, "Failed to remove temp file");
                }
            }
            return Err(e.into());
        }

        debug!(key = %key, bytes = value.len(), "Wrote JSON document");
        Ok(())
    }
}

async fn write_then_rename(temp_path: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(temp_path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    drop(file);
    fs::rename(temp_path, path).await
}

// =============================================================================
// SQLite Backend
// =============================================================================

/// Rows of the `kv_store` table.
#[derive(Debug, Clone)]
pub struct SqliteKvStore {
    pool: SqlitePool,
}

impl SqliteKvStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteKvStore { pool }
    }
}

#[async_trait]
impl KeyValueStore for SqliteKvStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(value,)| value))
    }

    async fn put(&self, key: &str, value: String) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(&value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "Upserted kv row");
        Ok(())
    }
}

// =============================================================================
// In-Memory Backend
// =============================================================================

/// HashMap-backed store. With a quota it behaves like a browser storage
/// area that refuses writes once full.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Rejects any write that would push the total stored bytes over `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        MemoryStore {
            entries: Mutex::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    fn lock(&self) -> DbResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| DbError::Internal("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> DbResult<()> {
        let mut entries = self.lock()?;

        if let Some(limit) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                warn!(key = %key, needed, limit, "Memory store quota exceeded");
                return Err(DbError::QuotaExceeded { needed, limit });
            }
        }

        entries.insert(key.to_string(), value);
        Ok(())
    }
}

// =============================================================================
// Typed Slot
// =============================================================================

/// One key of a [`KeyValueStore`] holding a JSON-encoded `T`.
pub struct JsonSlot<T> {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonSlot<T> {
    fn clone(&self) -> Self {
        JsonSlot {
            backend: Arc::clone(&self.backend),
            key: self.key.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for JsonSlot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonSlot").field("key", &self.key).finish()
    }
}

impl<T> JsonSlot<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        JsonSlot {
            backend,
            key: key.into(),
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads and decodes the stored value.
    ///
    /// ## Returns
    /// * `Ok(None)` - nothing stored under this key yet
    /// * `Err(DbError::Serialization)` - stored text is not a valid `T`
    pub async fn load(&self) -> DbResult<Option<T>> {
        match self.backend.get(&self.key).await? {
            None => Ok(None),
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        }
    }

    /// Encodes and stores `value`, replacing what was there.
    pub async fn save(&self, value: &T) -> DbResult<()> {
        let raw = serde_json::to_string(value)?;
        self.backend.put(&self.key, raw).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
