//! Reducer for the playlist screen

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::{PlaylistAction, PlaylistEnvironment, PlaylistError};
use crate::database::{Playlist, Song, SongDao};

/// What the playlist screen renders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistState {
    pub playlist: Option<Playlist>,
    /// Member songs resolved from the library, in playlist order
    pub songs: Vec<Song>,
}

/// Turns [`PlaylistAction`]s into environment calls and mirrors the
/// selected playlist into [`PlaylistState`].
pub struct PlaylistViewModel<E: PlaylistEnvironment> {
    environment: Arc<E>,
    state: Arc<watch::Sender<PlaylistState>>,
    collector: JoinHandle<()>,
}

impl<E: PlaylistEnvironment + 'static> PlaylistViewModel<E> {
    /// Start collecting the environment's selection.
    /// Must be called inside a tokio runtime.
    pub fn new(environment: Arc<E>, songs: Option<SongDao>) -> Self {
        let state = Arc::new(watch::Sender::new(PlaylistState::default()));

        let mut selection = environment.get_playlist();
        let publisher = state.clone();
        let collector = tokio::spawn(async move {
            while let Some(playlist) = selection.next().await {
                let resolved = match &songs {
                    Some(dao) => match dao.get_by_ids(&playlist.song_ids).await {
                        Ok(resolved) => resolved,
                        Err(e) => {
                            tracing::error!(
                                "Failed to resolve songs of playlist {}: {}",
                                playlist.id,
                                e
                            );
                            Vec::new()
                        }
                    },
                    None => Vec::new(),
                };
                publisher.send_replace(PlaylistState {
                    playlist: Some(playlist),
                    songs: resolved,
                });
            }
            tracing::debug!("Playlist selection stream ended");
        });

        Self {
            environment,
            state,
            collector,
        }
    }

    /// Observe screen state
    pub fn state(&self) -> watch::Receiver<PlaylistState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> PlaylistState {
        self.state.borrow().clone()
    }

    /// Handle one user intent
    pub async fn dispatch(&self, action: PlaylistAction) -> Result<(), PlaylistError> {
        match action {
            PlaylistAction::GetPlaylist { playlist_id } => {
                match self.environment.set_playlist(playlist_id).await {
                    Ok(_) => Ok(()),
                    Err(e @ PlaylistError::NotFound(_)) => {
                        tracing::warn!("{}", e);
                        Err(e)
                    }
                    Err(e) => {
                        tracing::error!("Failed to select playlist {}: {}", playlist_id, e);
                        Err(e)
                    }
                }
            }
        }
    }
}

impl<E: PlaylistEnvironment> Drop for PlaylistViewModel<E> {
    fn drop(&mut self) {
        self.collector.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::dispatcher::Dispatcher;
    use crate::features::playlist::{PlaylistStream, StorePlaylistEnvironment};
    use crate::features::playlist::environment::selection_stream;
    use std::collections::HashMap;

    /// In-memory environment with no database behind it
    struct FakeEnvironment {
        playlists: HashMap<i64, Playlist>,
        dispatcher: Dispatcher,
        selected: watch::Sender<Option<Playlist>>,
    }

    impl FakeEnvironment {
        fn new(playlists: impl IntoIterator<Item = Playlist>) -> Self {
            Self {
                playlists: playlists.into_iter().map(|p| (p.id, p)).collect(),
                dispatcher: Dispatcher::inline(),
                selected: watch::Sender::new(None),
            }
        }
    }

    impl PlaylistEnvironment for FakeEnvironment {
        fn dispatcher(&self) -> &Dispatcher {
            &self.dispatcher
        }

        fn get_playlist(&self) -> PlaylistStream {
            selection_stream(self.selected.subscribe())
        }

        async fn set_playlist(&self, playlist_id: i64) -> Result<Playlist, PlaylistError> {
            let playlist = self
                .playlists
                .get(&playlist_id)
                .cloned()
                .ok_or(PlaylistError::NotFound(playlist_id))?;
            self.selected.send_replace(Some(playlist.clone()));
            Ok(playlist)
        }
    }

    #[tokio::test]
    async fn get_playlist_action_updates_state() {
        let env = Arc::new(FakeEnvironment::new([Playlist::new(1, "Favorites")]));
        let vm = PlaylistViewModel::new(env, None);
        let mut state = vm.state();

        vm.dispatch(PlaylistAction::GetPlaylist { playlist_id: 1 })
            .await
            .unwrap();

        let state = state.wait_for(|s| s.playlist.is_some()).await.unwrap();
        assert_eq!(state.playlist.as_ref().unwrap().name, "Favorites");
    }

    #[tokio::test]
    async fn unknown_playlist_leaves_state_empty() {
        let env = Arc::new(FakeEnvironment::new(Vec::new()));
        let vm = PlaylistViewModel::new(env, None);

        let err = vm
            .dispatch(PlaylistAction::GetPlaylist { playlist_id: 9 })
            .await
            .unwrap_err();
        assert!(matches!(err, PlaylistError::NotFound(9)));
        assert_eq!(vm.snapshot(), PlaylistState::default());
    }

    #[tokio::test]
    async fn dropping_view_model_stops_collecting() {
        let env = Arc::new(FakeEnvironment::new([Playlist::new(1, "Favorites")]));
        let vm = PlaylistViewModel::new(env.clone(), None);
        let mut state = vm.state();
        drop(vm);

        env.set_playlist(1).await.unwrap();

        // Every sender is gone once the collector has been aborted
        assert!(state.changed().await.is_err());
        assert_eq!(state.borrow().playlist, None);
    }

    #[tokio::test]
    async fn songs_are_resolved_from_library() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(&dir.path().join("test.db")).await.unwrap();
        let song = |id: i64| Song {
            id,
            file_path: format!("/music/{}.mp3", id),
            title: format!("Track {}", id),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            duration_secs: 200,
            cover_path: None,
            is_favorite: false,
        };
        db.song_dao().upsert(&[song(1), song(2)]).await.unwrap();
        db.playlist_dao()
            .insert(&[Playlist::new(5, "Mix").with_songs([2, 1])])
            .await
            .unwrap();

        let env = Arc::new(StorePlaylistEnvironment::new(
            db.playlist_dao(),
            Dispatcher::background(),
        ));
        let vm = PlaylistViewModel::new(env, Some(db.song_dao()));
        let mut state = vm.state();

        vm.dispatch(PlaylistAction::GetPlaylist { playlist_id: 5 })
            .await
            .unwrap();

        let state = state.wait_for(|s| s.playlist.is_some()).await.unwrap();
        let ids: Vec<_> = state.songs.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
