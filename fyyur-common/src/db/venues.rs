//! Venue records

use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

use super::models::{check_genres, Deleted, Venue, VenueDraft};
use crate::{Error, Result};

/// Insert a venue and return the stored record
pub async fn insert_venue(pool: &SqlitePool, draft: &VenueDraft) -> Result<Venue> {
    check_genres(&draft.genres)?;

    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO venues (
            name, city, state, address, phone, website, facebook_link,
            image_link, genres, seeking_talent, seeking_description
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&draft.name)
    .bind(&draft.city)
    .bind(&draft.state)
    .bind(&draft.address)
    .bind(&draft.phone)
    .bind(&draft.website)
    .bind(&draft.facebook_link)
    .bind(&draft.image_link)
    .bind(Json(&draft.genres))
    .bind(draft.seeking_talent)
    .bind(&draft.seeking_description)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    let venue = fetch_venue(&mut tx, id).await?;
    tx.commit().await?;

    info!(venue_id = id, name = %venue.name, "Venue created");
    Ok(venue)
}

/// Overwrite every editable field of an existing venue
pub async fn update_venue(pool: &SqlitePool, id: i64, draft: &VenueDraft) -> Result<Venue> {
    check_genres(&draft.genres)?;

    let mut tx = pool.begin().await?;

    let affected = sqlx::query(
        r#"
        UPDATE venues SET
            name = ?, city = ?, state = ?, address = ?, phone = ?, website = ?,
            facebook_link = ?, image_link = ?, genres = ?, seeking_talent = ?,
            seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&draft.name)
    .bind(&draft.city)
    .bind(&draft.state)
    .bind(&draft.address)
    .bind(&draft.phone)
    .bind(&draft.website)
    .bind(&draft.facebook_link)
    .bind(&draft.image_link)
    .bind(Json(&draft.genres))
    .bind(draft.seeking_talent)
    .bind(&draft.seeking_description)
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if affected == 0 {
        return Err(Error::NotFound(format!("venue {}", id)));
    }

    let venue = fetch_venue(&mut tx, id).await?;
    tx.commit().await?;

    info!(venue_id = id, "Venue updated");
    Ok(venue)
}

/// Delete a venue together with every show it hosts
pub async fn delete_venue(pool: &SqlitePool, id: i64) -> Result<Deleted<Venue>> {
    let mut tx = pool.begin().await?;

    let venue = fetch_venue(&mut tx, id).await?;

    let shows_removed = sqlx::query("DELETE FROM shows WHERE venue_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(venue_id = id, shows_removed, "Venue deleted");
    Ok(Deleted {
        record: venue,
        shows_removed,
    })
}

/// Fetch one venue
pub async fn get_venue(pool: &SqlitePool, id: i64) -> Result<Venue> {
    let mut conn = pool.acquire().await?;
    fetch_venue(&mut conn, id).await
}

/// Every venue's id and name, in store order
pub async fn list_venues(pool: &SqlitePool) -> Result<Vec<(i64, String)>> {
    let rows = sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM venues ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Number of stored venues
pub async fn count_venues(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM venues")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub(crate) async fn fetch_venue(conn: &mut SqliteConnection, id: i64) -> Result<Venue> {
    sqlx::query_as::<_, Venue>(
        r#"
        SELECT id, name, city, state, address, phone, website, facebook_link,
               image_link, genres, seeking_talent, seeking_description
        FROM venues
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| Error::NotFound(format!("venue {}", id)))
}
