//! Database module for persistent storage
//! Uses SQLite via sqlx for storing playlists and the song library

mod dao;
mod invalidation;
mod models;
mod ops;
mod repository;
mod schema;

pub use dao::{PlaylistDao, PlaylistListStream, SongDao};
pub use invalidation::{InvalidationTracker, Table};
pub use models::*;
pub use repository::Database;
