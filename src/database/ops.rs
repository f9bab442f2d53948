//! Database operations organized by entity type

mod playlists;
mod songs;

pub use playlists::*;
pub use songs::*;
