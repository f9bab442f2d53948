//! Database repository - main entry point
//! Hands out the access objects that delegate to ops modules

use anyhow::Result;
use sqlx::{Pool, Sqlite, sqlite::SqlitePoolOptions};
use std::path::Path;
use std::sync::Arc;

use super::dao::{PlaylistDao, SongDao};
use super::invalidation::InvalidationTracker;
use super::schema;

/// Database connection pool wrapper
#[derive(Debug, Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
    tracker: Arc<InvalidationTracker>,
}

impl Database {
    /// Create and initialize database at the given path
    pub async fn new(db_path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await?;

        // Readers of list() must not block behind background writes
        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await?;

        sqlx::query("PRAGMA synchronous = NORMAL")
            .execute(&pool)
            .await?;

        schema::run_migrations(&pool).await?;

        tracing::debug!("Database ready at {}", db_path.display());

        Ok(Self {
            pool,
            tracker: Arc::new(InvalidationTracker::new()),
        })
    }

    /// Open the database in the platform data directory
    pub async fn open_default() -> Result<Self> {
        let db_path = crate::utils::data_dir().join("musicompose.db");
        tracing::info!("Initializing database at: {}", db_path.display());
        Self::new(&db_path).await
    }

    /// Access object for `playlist_table`
    pub fn playlist_dao(&self) -> PlaylistDao {
        PlaylistDao::new(self.pool.clone(), self.tracker.clone())
    }

    /// Access object for `song_table`
    pub fn song_dao(&self) -> SongDao {
        SongDao::new(self.pool.clone(), self.tracker.clone())
    }

    pub fn tracker(&self) -> &InvalidationTracker {
        &self.tracker
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
