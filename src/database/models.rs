//! Database models for persistent storage
//! These models map directly to SQLite tables

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Song metadata stored in database
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Song {
    /// Unique identifier assigned by the media scanner
    pub id: i64,
    /// File path on disk
    pub file_path: String,
    /// Song title
    pub title: String,
    /// Artist name
    pub artist: String,
    /// Album name
    pub album: String,
    /// Duration in seconds
    pub duration_secs: i64,
    /// Cover art path (cached locally)
    pub cover_path: Option<String>,
    /// Marked as favorite from the player
    pub is_favorite: bool,
}

/// User-curated playlist
///
/// `song_ids` keeps the playlist order and is stored as a JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Primary key, chosen by the caller
    pub id: i64,
    /// Playlist name
    pub name: String,
    /// Cover image path
    pub cover_path: Option<String>,
    /// Member songs in playlist order
    pub song_ids: Vec<i64>,
}

impl Playlist {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            cover_path: None,
            song_ids: Vec::new(),
        }
    }

    pub fn with_songs(mut self, song_ids: impl IntoIterator<Item = i64>) -> Self {
        self.song_ids = song_ids.into_iter().collect();
        self
    }
}

/// Raw `playlist_table` row
#[derive(Debug, Clone, FromRow)]
pub(crate) struct PlaylistRow {
    pub id: i64,
    pub name: String,
    pub cover_path: Option<String>,
    pub songs: String,
}

impl TryFrom<PlaylistRow> for Playlist {
    type Error = serde_json::Error;

    fn try_from(row: PlaylistRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: row.name,
            cover_path: row.cover_path,
            song_ids: serde_json::from_str(&row.songs)?,
        })
    }
}
