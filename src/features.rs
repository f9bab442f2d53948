//! Feature modules - business logic separated from UI
//!
//! Each feature module contains the core logic for a specific functionality.
//! Features should not depend on UI components directly.

pub mod playlist;
pub mod preference;
pub mod sort;

pub use playlist::{
    PlaylistAction, PlaylistEnvironment, PlaylistError, PlaylistState, PlaylistStream,
    PlaylistViewModel, StorePlaylistEnvironment,
};
pub use preference::{Language, Preference, PreferenceError, Preferences, UiMode};
pub use sort::{SortAlbumOption, SortArtistOption, SortSongOption, SortType};
