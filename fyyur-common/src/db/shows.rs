//! Show records (create-only)

use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

use super::models::{NewShow, Show};
use crate::time::{is_storable, to_store_precision};
use crate::{Error, Result};

/// Insert a show after checking both parents exist
///
/// Fails with `ConstraintViolation` when the venue or artist is missing or
/// the start time has a year outside 0000..=9999; nothing is written in
/// either case.
pub async fn insert_show(pool: &SqlitePool, new_show: &NewShow) -> Result<Show> {
    if !is_storable(new_show.start_time) {
        return Err(Error::ConstraintViolation(format!(
            "start time {} is outside years 0000-9999",
            new_show.start_time
        )));
    }

    let mut tx = pool.begin().await?;

    if !row_exists(&mut tx, "SELECT EXISTS(SELECT 1 FROM venues WHERE id = ?)", new_show.venue_id)
        .await?
    {
        return Err(Error::ConstraintViolation(format!(
            "venue {} does not exist",
            new_show.venue_id
        )));
    }

    if !row_exists(&mut tx, "SELECT EXISTS(SELECT 1 FROM artists WHERE id = ?)", new_show.artist_id)
        .await?
    {
        return Err(Error::ConstraintViolation(format!(
            "artist {} does not exist",
            new_show.artist_id
        )));
    }

    let id = sqlx::query("INSERT INTO shows (venue_id, artist_id, start_time) VALUES (?, ?, ?)")
        .bind(new_show.venue_id)
        .bind(new_show.artist_id)
        .bind(to_store_precision(new_show.start_time))
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    let show = fetch_show(&mut tx, id).await?;
    tx.commit().await?;

    info!(
        show_id = id,
        venue_id = show.venue_id,
        artist_id = show.artist_id,
        "Show created"
    );
    Ok(show)
}

/// Fetch one show
pub async fn get_show(pool: &SqlitePool, id: i64) -> Result<Show> {
    let mut conn = pool.acquire().await?;
    fetch_show(&mut conn, id).await
}

/// Number of stored shows
pub async fn count_shows(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM shows")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

async fn fetch_show(conn: &mut SqliteConnection, id: i64) -> Result<Show> {
    sqlx::query_as::<_, Show>("SELECT id, venue_id, artist_id, start_time FROM shows WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| Error::NotFound(format!("show {}", id)))
}

async fn row_exists(conn: &mut SqliteConnection, sql: &str, id: i64) -> Result<bool> {
    let exists = sqlx::query_scalar(sql).bind(id).fetch_one(conn).await?;
    Ok(exists)
}
