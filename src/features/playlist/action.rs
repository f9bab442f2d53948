//! User intents for the playlist screen

/// One user intent, consumed once by [`super::PlaylistViewModel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistAction {
    /// Select the playlist with this id
    GetPlaylist { playlist_id: i64 },
}
