//! Player controls reachable from any screen

use tokio::runtime::Handle;

use super::state::{Ambient, MusicomposeState};
use crate::database::SongDao;

/// Commands the UI sends to the player
pub trait SongController: Send + Sync {
    fn show_bottom_music_player(&self);
    fn set_favorite(&self, is_favorite: bool);
    fn resume(&self);
    fn pause(&self);
}

/// Controller that reflects commands into [`MusicomposeState`].
///
/// Audio output is driven by whoever observes the state; favorites are
/// written back to the song table when persistence is attached.
#[derive(Debug, Clone)]
pub struct StateSongController {
    state: Ambient<MusicomposeState>,
    persistence: Option<(SongDao, Handle)>,
}

impl StateSongController {
    pub fn new(state: Ambient<MusicomposeState>) -> Self {
        Self {
            state,
            persistence: None,
        }
    }

    /// Persist favorite toggles through `songs` on `handle`
    pub fn with_persistence(mut self, songs: SongDao, handle: Handle) -> Self {
        self.persistence = Some((songs, handle));
        self
    }

    fn set_playing(&self, is_playing: bool) {
        self.state.update(|s| MusicomposeState {
            is_playing,
            ..s.clone()
        });
    }

    fn set_player_showed(&self) {
        self.state.update(|s| MusicomposeState {
            is_bottom_music_player_showed: true,
            ..s.clone()
        });
    }
}

impl SongController for StateSongController {
    fn show_bottom_music_player(&self) {
        tracing::debug!("Showing bottom music player");
        self.set_player_showed();
    }

    fn set_favorite(&self, is_favorite: bool) {
        let Some(current) = self.state.with(|s| s.current_song_played.clone()) else {
            tracing::debug!("Favorite toggled with no current song");
            return;
        };

        self.state.update(|s| {
            let mut next = s.clone();
            if let Some(song) = next.current_song_played.as_mut() {
                song.is_favorite = is_favorite;
            }
            if let Some(song) = next.songs.iter_mut().find(|song| song.id == current.id) {
                song.is_favorite = is_favorite;
            }
            next
        });

        if let Some((songs, handle)) = &self.persistence {
            let songs = songs.clone();
            let song_id = current.id;
            handle.spawn(async move {
                if let Err(e) = songs.set_favorite(song_id, is_favorite).await {
                    tracing::error!("Failed to persist favorite for song {}: {}", song_id, e);
                }
            });
        }
    }

    fn resume(&self) {
        self.set_playing(true);
    }

    fn pause(&self) {
        self.set_playing(false);
    }
}
