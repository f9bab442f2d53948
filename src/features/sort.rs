//! Sort options for the library lists

use serde::{Deserialize, Serialize};

use super::preference::Preference;

/// Which library list a sort sheet applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortType {
    #[default]
    Song,
    Album,
    Artist,
}

impl SortType {
    /// All sort types in declaration order
    pub fn all() -> &'static [SortType] {
        &[SortType::Song, SortType::Album, SortType::Artist]
    }

    /// Stable name used in routes
    pub fn name(&self) -> &'static str {
        match self {
            SortType::Song => "song",
            SortType::Album => "album",
            SortType::Artist => "artist",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }

    /// Position in declaration order
    pub fn ordinal(&self) -> usize {
        *self as usize
    }

    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::all().get(ordinal).copied()
    }

    /// Preference slot holding the chosen option for this list
    pub fn preference_key(&self) -> &'static str {
        match self {
            SortType::Song => Preference::SORT_SONG_OPTION,
            SortType::Album => Preference::SORT_ALBUM_OPTION,
            SortType::Artist => Preference::SORT_ARTIST_OPTION,
        }
    }
}

impl std::fmt::Display for SortType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Song list ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortSongOption {
    #[default]
    SongName,
    DateAdded,
    Artist,
    Album,
}

/// Album list ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortAlbumOption {
    #[default]
    AlbumName,
    Artist,
}

/// Artist list ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortArtistOption {
    #[default]
    ArtistName,
}
