//! Table access objects
//!
//! Each access object owns a pool handle and the shared invalidation
//! tracker, so it can be cloned into background tasks freely.

use anyhow::Result;
use futures_util::stream::BoxStream;
use sqlx::{Pool, Sqlite};
use std::sync::Arc;

use super::invalidation::{InvalidationTracker, Table};
use super::{Playlist, Song, ops};
use crate::dispatcher::Dispatcher;

/// Stream of full playlist collections
pub type PlaylistListStream = BoxStream<'static, Result<Vec<Playlist>>>;

/// Access object for `playlist_table`.
///
/// Mutations run on the attached [`Dispatcher`]; the default polls them on
/// the calling task.
#[derive(Debug, Clone)]
pub struct PlaylistDao {
    pool: Pool<Sqlite>,
    tracker: Arc<InvalidationTracker>,
    dispatcher: Dispatcher,
}

impl PlaylistDao {
    pub(crate) fn new(pool: Pool<Sqlite>, tracker: Arc<InvalidationTracker>) -> Self {
        Self {
            pool,
            tracker,
            dispatcher: Dispatcher::inline(),
        }
    }

    /// Run insert/update/delete on `dispatcher`
    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Observe the whole playlist collection.
    ///
    /// Emits the current snapshot when first polled and a fresh one after
    /// every committed mutation. The stream never ends while the database
    /// is alive; drop it to unsubscribe.
    pub fn list(&self) -> PlaylistListStream {
        let pool = self.pool.clone();
        let mut changes = self.tracker.subscribe(Table::Playlist);

        Box::pin(async_stream::stream! {
            loop {
                // Mark seen before querying so a concurrent commit re-triggers
                changes.borrow_and_update();
                yield ops::get_all_playlists(&pool).await;
                if changes.changed().await.is_err() {
                    break;
                }
            }
        })
    }

    /// Fetch one playlist by exact id
    pub async fn get(&self, id: i64) -> Result<Option<Playlist>> {
        ops::get_playlist(&self.pool, id).await
    }

    pub async fn count(&self) -> Result<i64> {
        ops::count_playlists(&self.pool).await
    }

    /// Insert playlists; ids already present are skipped
    pub async fn insert(&self, playlists: &[Playlist]) -> Result<u64> {
        let pool = self.pool.clone();
        let batch = playlists.to_vec();
        let inserted = self
            .dispatcher
            .run(async move { ops::insert_playlists(&pool, &batch).await })
            .await??;
        tracing::debug!(
            requested = playlists.len(),
            inserted,
            "Inserted playlists"
        );
        self.tracker.notify(Table::Playlist);
        Ok(inserted)
    }

    /// Overwrite existing playlists with the given field values
    pub async fn update(&self, playlists: &[Playlist]) -> Result<u64> {
        let pool = self.pool.clone();
        let batch = playlists.to_vec();
        let updated = self
            .dispatcher
            .run(async move { ops::update_playlists(&pool, &batch).await })
            .await??;
        tracing::debug!(requested = playlists.len(), updated, "Updated playlists");
        self.tracker.notify(Table::Playlist);
        Ok(updated)
    }

    /// Delete playlists matching the given ids
    pub async fn delete(&self, playlists: &[Playlist]) -> Result<u64> {
        let pool = self.pool.clone();
        let batch = playlists.to_vec();
        let deleted = self
            .dispatcher
            .run(async move { ops::delete_playlists(&pool, &batch).await })
            .await??;
        tracing::debug!(requested = playlists.len(), deleted, "Deleted playlists");
        self.tracker.notify(Table::Playlist);
        Ok(deleted)
    }
}

/// Access object for `song_table`
#[derive(Debug, Clone)]
pub struct SongDao {
    pool: Pool<Sqlite>,
    tracker: Arc<InvalidationTracker>,
}

impl SongDao {
    pub(crate) fn new(pool: Pool<Sqlite>, tracker: Arc<InvalidationTracker>) -> Self {
        Self { pool, tracker }
    }

    pub async fn upsert(&self, songs: &[Song]) -> Result<u64> {
        let written = ops::upsert_songs(&self.pool, songs).await?;
        self.tracker.notify(Table::Song);
        Ok(written)
    }

    pub async fn get_all(&self) -> Result<Vec<Song>> {
        ops::get_all_songs(&self.pool).await
    }

    pub async fn get(&self, id: i64) -> Result<Option<Song>> {
        ops::get_song(&self.pool, id).await
    }

    /// Resolve ids in order, unknown ids are dropped
    pub async fn get_by_ids(&self, ids: &[i64]) -> Result<Vec<Song>> {
        ops::get_songs_by_ids(&self.pool, ids).await
    }

    pub async fn set_favorite(&self, id: i64, is_favorite: bool) -> Result<bool> {
        let changed = ops::set_favorite(&self.pool, id, is_favorite).await?;
        self.tracker.notify(Table::Song);
        Ok(changed > 0)
    }
}
