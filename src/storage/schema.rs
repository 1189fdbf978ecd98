use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Connection, SqlitePool,
};
use std::str::FromStr;
use std::time::Duration;

use super::types::StoreError;

// ============================================================================
// ArticleStore
// ============================================================================

#[derive(Clone)]
pub struct ArticleStore {
    pub(crate) pool: SqlitePool,
}

impl ArticleStore {
    /// Open (creating if absent) the database at `path` and check that it
    /// answers a ping.
    ///
    /// `":memory:"` gives a private in-memory database. The store keeps a
    /// single connection, so an in-memory database lives as long as the
    /// store does.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Other` if the file cannot be opened or the ping
    /// fails, and `StoreError::Schema` if the table bootstrap fails.
    pub async fn open(path: &str) -> Result<Self, StoreError> {
        // Pre-create the file user-only so it never exists with umask permissions
        #[cfg(unix)]
        if path != ":memory:" {
            use std::os::unix::fs::OpenOptionsExt;
            let db_path = std::path::Path::new(path);
            if !db_path.exists() {
                let _file = std::fs::OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .mode(0o600)
                    .open(db_path)
                    .ok(); // If creation fails, SQLite will report the error at connect_with.
            }
        }

        // The path goes in as a filename, not a URL, so `%` and `?` stay literal
        let options = if path == ":memory:" {
            SqliteConnectOptions::from_str("sqlite::memory:")?
        } else {
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
        }
        .pragma("busy_timeout", "5000");
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await?;

        pool.acquire().await?.ping().await?;
        tracing::debug!(path = %path, "Opened article store");

        let store = Self { pool };
        store
            .ensure_schema()
            .await
            .map_err(|e| StoreError::Schema(e.to_string()))?;
        Ok(store)
    }

    /// Create `saved_articles` if it is not there yet.
    ///
    /// This is the only DDL the store issues. An existing table is left as
    /// it is, whatever its extra columns.
    async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS saved_articles (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                url TEXT NOT NULL,
                saved_at INTEGER NOT NULL
            )
        "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Close the underlying connection.
    pub async fn close(self) {
        self.pool.close().await;
    }
}
