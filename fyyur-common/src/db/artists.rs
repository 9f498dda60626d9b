//! Artist records

use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

use super::models::{check_genres, Artist, ArtistDraft, Deleted};
use crate::{Error, Result};

/// Insert an artist and return the stored record
pub async fn insert_artist(pool: &SqlitePool, draft: &ArtistDraft) -> Result<Artist> {
    check_genres(&draft.genres)?;

    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO artists (
            name, city, state, phone, website, facebook_link, image_link,
            genres, seeking_venue, seeking_description
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&draft.name)
    .bind(&draft.city)
    .bind(&draft.state)
    .bind(&draft.phone)
    .bind(&draft.website)
    .bind(&draft.facebook_link)
    .bind(&draft.image_link)
    .bind(Json(&draft.genres))
    .bind(draft.seeking_venue)
    .bind(&draft.seeking_description)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    let artist = fetch_artist(&mut tx, id).await?;
    tx.commit().await?;

    info!(artist_id = id, name = %artist.name, "Artist created");
    Ok(artist)
}

/// Overwrite every editable field of an existing artist
pub async fn update_artist(pool: &SqlitePool, id: i64, draft: &ArtistDraft) -> Result<Artist> {
    check_genres(&draft.genres)?;

    let mut tx = pool.begin().await?;

    let affected = sqlx::query(
        r#"
        UPDATE artists SET
            name = ?, city = ?, state = ?, phone = ?, website = ?,
            facebook_link = ?, image_link = ?, genres = ?, seeking_venue = ?,
            seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&draft.name)
    .bind(&draft.city)
    .bind(&draft.state)
    .bind(&draft.phone)
    .bind(&draft.website)
    .bind(&draft.facebook_link)
    .bind(&draft.image_link)
    .bind(Json(&draft.genres))
    .bind(draft.seeking_venue)
    .bind(&draft.seeking_description)
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if affected == 0 {
        return Err(Error::NotFound(format!("artist {}", id)));
    }

    let artist = fetch_artist(&mut tx, id).await?;
    tx.commit().await?;

    info!(artist_id = id, "Artist updated");
    Ok(artist)
}

/// Delete an artist together with every show they play
pub async fn delete_artist(pool: &SqlitePool, id: i64) -> Result<Deleted<Artist>> {
    let mut tx = pool.begin().await?;

    let artist = fetch_artist(&mut tx, id).await?;

    let shows_removed = sqlx::query("DELETE FROM shows WHERE artist_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(artist_id = id, shows_removed, "Artist deleted");
    Ok(Deleted {
        record: artist,
        shows_removed,
    })
}

/// Fetch one artist
pub async fn get_artist(pool: &SqlitePool, id: i64) -> Result<Artist> {
    let mut conn = pool.acquire().await?;
    fetch_artist(&mut conn, id).await
}

/// Every artist's id and name, in store order
pub async fn list_artists(pool: &SqlitePool) -> Result<Vec<(i64, String)>> {
    let rows = sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM artists ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Number of stored artists
pub async fn count_artists(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM artists")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub(crate) async fn fetch_artist(conn: &mut SqliteConnection, id: i64) -> Result<Artist> {
    sqlx::query_as::<_, Artist>(
        r#"
        SELECT id, name, city, state, phone, website, facebook_link,
               image_link, genres, seeking_venue, seeking_description
        FROM artists
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| Error::NotFound(format!("artist {}", id)))
}
