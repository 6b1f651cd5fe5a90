//! SQLite-backed key-value store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use tokio::runtime::{Builder, Runtime};
use tokio::sync::Mutex;

use super::{KeyValueStore, StorageError};

/// Persistent store in a single `kv_store` table.
///
/// The API is synchronous: calls run on a private current-thread runtime, so the
/// store must not be used from inside another async runtime. The database file and
/// table are created on first use.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
    // Declared before the runtime so the pool is dropped first.
    pool: Arc<Mutex<Option<SqlitePool>>>,
    runtime: Arc<Runtime>,
}

impl SqliteStore {
    /// Create a store for `path` (lazy initialization).
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| {
                StorageError::backend(format!("failed to create storage runtime: {err}"))
            })?;

        Ok(Self {
            path: path.into(),
            pool: Arc::new(Mutex::new(None)),
            runtime: Arc::new(runtime),
        })
    }

    /// Store at the default location under the OS data directory.
    pub fn open_default() -> Result<Self, StorageError> {
        let path = default_path().map_err(|err| StorageError::backend(format!("{err:#}")))?;
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_initialized(&self) -> anyhow::Result<SqlitePool> {
        let mut pool_guard = self.pool.lock().await;
        if let Some(pool) = pool_guard.as_ref() {
            return Ok(pool.clone());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create storage directory at {parent:?}"))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("failed to open SQLite store at {:?}", self.path))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .context("failed to create kv_store table")?;

        tracing::debug!(path = ?self.path, "sqlite store initialized");
        *pool_guard = Some(pool.clone());
        Ok(pool)
    }

    fn run<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = anyhow::Result<T>>,
    ) -> Result<T, StorageError> {
        self.runtime.block_on(fut).map_err(|err| {
            tracing::debug!(op, error = %format!("{err:#}"), "sqlite store call failed");
            StorageError::backend(format!("{err:#}"))
        })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.run("get", async {
            let pool = self.ensure_initialized().await?;
            let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?1")
                .bind(key)
                .fetch_optional(&pool)
                .await
                .context("failed to read key")?;

            let value = row
                .map(|row| row.try_get::<String, _>("value"))
                .transpose()
                .context("invalid value column")?;
            Ok::<_, anyhow::Error>(value)
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.run("set", async {
            let pool = self.ensure_initialized().await?;
            sqlx::query(
                r#"
                INSERT INTO kv_store (key, value, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key)
                DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(key)
            .bind(value)
            .bind(Utc::now().to_rfc3339())
            .execute(&pool)
            .await
            .context("failed to upsert key")?;
            Ok::<(), anyhow::Error>(())
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.run("remove", async {
            let pool = self.ensure_initialized().await?;
            sqlx::query("DELETE FROM kv_store WHERE key = ?1")
                .bind(key)
                .execute(&pool)
                .await
                .context("failed to delete key")?;
            Ok::<(), anyhow::Error>(())
        })
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.run("clear", async {
            let pool = self.ensure_initialized().await?;
            sqlx::query("DELETE FROM kv_store")
                .execute(&pool)
                .await
                .context("failed to clear kv_store")?;
            Ok::<(), anyhow::Error>(())
        })
    }
}

/// `<data dir>/vitashop/storage.db`, falling back to `~/.local/share`.
pub fn default_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS data directory")?;

    Ok(base.join("vitashop").join("storage.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopening_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.db");

        let store = SqliteStore::new(&path).unwrap();
        assert_eq!(store.get("healthcare_cart").unwrap(), None);
        store.set("healthcare_cart", "[]").unwrap();
        store.set("healthcare_cart", r#"[{"product_id":1,"quantity":2}]"#).unwrap();
        drop(store);

        let reopened = SqliteStore::new(&path).unwrap();
        assert_eq!(
            reopened.get("healthcare_cart").unwrap().as_deref(),
            Some(r#"[{"product_id":1,"quantity":2}]"#)
        );
    }

    #[test]
    fn remove_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::new(dir.path().join("store.db")).unwrap();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();

        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));

        store.clear().unwrap();
        assert_eq!(store.get("b").unwrap(), None);
    }

    #[test]
    fn unopenable_path_reports_a_backend_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the database file should be.
        let store = SqliteStore::new(dir.path()).unwrap();
        assert!(matches!(store.get("x"), Err(StorageError::Backend(_))));
    }
}
