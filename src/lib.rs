//! Musicompose - music player core
//!
//! Playlist storage on SQLite, playlist selection, user preferences, the
//! shared player state and the navigation host that presents them.

pub mod app;
pub mod database;
pub mod dispatcher;
pub mod features;
pub mod navigation;
pub mod ui;
pub mod utils;
