//! Playlist CRUD operations

use anyhow::Result;
use sqlx::{Pool, Sqlite};

use crate::database::Playlist;
use crate::database::models::PlaylistRow;

/// Get all playlists ordered by id
pub async fn get_all_playlists(pool: &Pool<Sqlite>) -> Result<Vec<Playlist>> {
    let rows = sqlx::query_as::<_, PlaylistRow>(
        "SELECT id, name, cover_path, songs FROM playlist_table ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    let playlists = rows
        .into_iter()
        .map(Playlist::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(playlists)
}

/// Get playlist by id
pub async fn get_playlist(pool: &Pool<Sqlite>, id: i64) -> Result<Option<Playlist>> {
    let row = sqlx::query_as::<_, PlaylistRow>(
        "SELECT id, name, cover_path, songs FROM playlist_table WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Playlist::try_from).transpose()?)
}

/// Count stored playlists
pub async fn count_playlists(pool: &Pool<Sqlite>) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM playlist_table")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Insert playlists, skipping any id that already exists.
/// Returns the number of rows actually inserted.
pub async fn insert_playlists(pool: &Pool<Sqlite>, playlists: &[Playlist]) -> Result<u64> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0;

    for playlist in playlists {
        let songs = serde_json::to_string(&playlist.song_ids)?;
        let result = sqlx::query(
            "INSERT OR IGNORE INTO playlist_table (id, name, cover_path, songs) VALUES (?, ?, ?, ?)",
        )
        .bind(playlist.id)
        .bind(&playlist.name)
        .bind(&playlist.cover_path)
        .bind(songs)
        .execute(&mut *tx)
        .await?;
        inserted += result.rows_affected();
    }

    tx.commit().await?;
    Ok(inserted)
}

/// Overwrite every field of existing playlists.
/// Ids with no stored row are left alone.
pub async fn update_playlists(pool: &Pool<Sqlite>, playlists: &[Playlist]) -> Result<u64> {
    let mut tx = pool.begin().await?;
    let mut updated = 0;

    for playlist in playlists {
        let songs = serde_json::to_string(&playlist.song_ids)?;
        let result =
            sqlx::query("UPDATE playlist_table SET name = ?, cover_path = ?, songs = ? WHERE id = ?")
                .bind(&playlist.name)
                .bind(&playlist.cover_path)
                .bind(songs)
                .bind(playlist.id)
                .execute(&mut *tx)
                .await?;
        updated += result.rows_affected();
    }

    tx.commit().await?;
    Ok(updated)
}

/// Delete playlists by id
pub async fn delete_playlists(pool: &Pool<Sqlite>, playlists: &[Playlist]) -> Result<u64> {
    let mut tx = pool.begin().await?;
    let mut deleted = 0;

    for playlist in playlists {
        let result = sqlx::query("DELETE FROM playlist_table WHERE id = ?")
            .bind(playlist.id)
            .execute(&mut *tx)
            .await?;
        deleted += result.rows_affected();
    }

    tx.commit().await?;
    Ok(deleted)
}
