//! Database schema migrations

use anyhow::Result;
use sqlx::{Pool, Sqlite};

/// Run database migrations to create/update schema
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<()> {
    // Songs are written by the media scanner, ids come from it
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS song_table (
            id INTEGER PRIMARY KEY,
            file_path TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL,
            artist TEXT NOT NULL DEFAULT 'Unknown Artist',
            album TEXT NOT NULL DEFAULT 'Unknown Album',
            duration_secs INTEGER NOT NULL DEFAULT 0,
            cover_path TEXT,
            is_favorite INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_song_table_artist ON song_table(artist);
        CREATE INDEX IF NOT EXISTS idx_song_table_album ON song_table(album);
        "#,
    )
    .execute(pool)
    .await?;

    // Playlists keep their member ids as a JSON array, order preserved
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS playlist_table (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            cover_path TEXT,
            songs TEXT NOT NULL DEFAULT '[]'
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
