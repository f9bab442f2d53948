//! Playlist feature: selection environment, user actions and the reducer

mod action;
pub(crate) mod environment;
mod view_model;

pub use action::PlaylistAction;
pub use environment::{
    PlaylistEnvironment, PlaylistError, PlaylistStream, StorePlaylistEnvironment,
};
pub use view_model::{PlaylistState, PlaylistViewModel};
