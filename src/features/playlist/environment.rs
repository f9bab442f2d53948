//! Playlist environment
//!
//! The playlist feature depends on [`PlaylistEnvironment`] rather than on
//! the database, so tests can swap in an in-memory fake.

use std::future::Future;

use futures_util::stream::BoxStream;
use tokio::sync::watch;

use crate::database::{Playlist, PlaylistDao};
use crate::dispatcher::{DispatchError, Dispatcher};

/// Stream of selected playlists
pub type PlaylistStream = BoxStream<'static, Playlist>;

/// Errors surfaced by playlist selection
#[derive(Debug, thiserror::Error)]
pub enum PlaylistError {
    #[error("playlist {0} not found")]
    NotFound(i64),
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Capabilities the playlist feature needs
pub trait PlaylistEnvironment: Send + Sync {
    /// Execution context used by every suspending operation
    fn dispatcher(&self) -> &Dispatcher;

    /// Observe the selected playlist.
    ///
    /// Emits the current selection when polled, if there is one, and every
    /// later selection.
    fn get_playlist(&self) -> PlaylistStream;

    /// Select the playlist with the given id.
    ///
    /// An unknown id leaves the selection untouched and returns
    /// [`PlaylistError::NotFound`].
    fn set_playlist(
        &self,
        playlist_id: i64,
    ) -> impl Future<Output = Result<Playlist, PlaylistError>> + Send;
}

/// Environment backed by the playlist table
#[derive(Debug)]
pub struct StorePlaylistEnvironment {
    dao: PlaylistDao,
    dispatcher: Dispatcher,
    selected: watch::Sender<Option<Playlist>>,
}

impl StorePlaylistEnvironment {
    pub fn new(dao: PlaylistDao, dispatcher: Dispatcher) -> Self {
        Self {
            dao,
            dispatcher,
            selected: watch::Sender::new(None),
        }
    }

    /// Currently selected playlist, if any
    pub fn selected(&self) -> Option<Playlist> {
        self.selected.borrow().clone()
    }
}

/// Turn a selection channel into a stream of present values
pub(crate) fn selection_stream(mut rx: watch::Receiver<Option<Playlist>>) -> PlaylistStream {
    Box::pin(async_stream::stream! {
        loop {
            let current = rx.borrow_and_update().clone();
            if let Some(playlist) = current {
                yield playlist;
            }
            if rx.changed().await.is_err() {
                break;
            }
        }
    })
}

impl PlaylistEnvironment for StorePlaylistEnvironment {
    fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    fn get_playlist(&self) -> PlaylistStream {
        selection_stream(self.selected.subscribe())
    }

    async fn set_playlist(&self, playlist_id: i64) -> Result<Playlist, PlaylistError> {
        let dao = self.dao.clone();
        let found = self
            .dispatcher
            .run(async move { dao.get(playlist_id).await })
            .await??;

        match found {
            Some(playlist) => {
                tracing::info!(playlist_id, name = %playlist.name, "Selected playlist");
                self.selected.send_replace(Some(playlist.clone()));
                Ok(playlist)
            }
            None => Err(PlaylistError::NotFound(playlist_id)),
        }
    }
}
