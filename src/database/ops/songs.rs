//! Song library operations

use anyhow::Result;
use sqlx::{Pool, Sqlite};

use crate::database::Song;

/// Insert or replace songs reported by the media scanner
pub async fn upsert_songs(pool: &Pool<Sqlite>, songs: &[Song]) -> Result<u64> {
    let mut tx = pool.begin().await?;
    let mut written = 0;

    for song in songs {
        let result = sqlx::query(
            r#"
            INSERT INTO song_table (id, file_path, title, artist, album, duration_secs, cover_path, is_favorite)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                file_path = excluded.file_path,
                title = excluded.title,
                artist = excluded.artist,
                album = excluded.album,
                duration_secs = excluded.duration_secs,
                cover_path = excluded.cover_path,
                is_favorite = excluded.is_favorite
            "#,
        )
        .bind(song.id)
        .bind(&song.file_path)
        .bind(&song.title)
        .bind(&song.artist)
        .bind(&song.album)
        .bind(song.duration_secs)
        .bind(&song.cover_path)
        .bind(song.is_favorite)
        .execute(&mut *tx)
        .await?;
        written += result.rows_affected();
    }

    tx.commit().await?;
    Ok(written)
}

/// Get all songs ordered by title
pub async fn get_all_songs(pool: &Pool<Sqlite>) -> Result<Vec<Song>> {
    let songs = sqlx::query_as::<_, Song>("SELECT * FROM song_table ORDER BY title, id")
        .fetch_all(pool)
        .await?;
    Ok(songs)
}

/// Get song by id
pub async fn get_song(pool: &Pool<Sqlite>, id: i64) -> Result<Option<Song>> {
    let song = sqlx::query_as::<_, Song>("SELECT * FROM song_table WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(song)
}

/// Resolve song ids in the order given, skipping unknown ids
pub async fn get_songs_by_ids(pool: &Pool<Sqlite>, ids: &[i64]) -> Result<Vec<Song>> {
    let mut songs = Vec::with_capacity(ids.len());
    for &id in ids {
        if let Some(song) = get_song(pool, id).await? {
            songs.push(song);
        }
    }
    Ok(songs)
}

/// Toggle the favorite flag of a song
pub async fn set_favorite(pool: &Pool<Sqlite>, id: i64, is_favorite: bool) -> Result<u64> {
    let result = sqlx::query("UPDATE song_table SET is_favorite = ? WHERE id = ?")
        .bind(is_favorite)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
