//! Venue and artist detail views with the past/upcoming show split

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::db::artists::fetch_artist;
use crate::db::venues::fetch_venue;
use crate::db::{Artist, Venue};
use crate::time::to_store_precision;
use crate::Result;

/// Anything with a start time that can be split around `now`
pub trait Scheduled {
    fn start_time(&self) -> DateTime<Utc>;
}

/// A show on a venue page: the artist playing it
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ArtistShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// A show on an artist page: the venue hosting it
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct VenueShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl Scheduled for ArtistShow {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

impl Scheduled for VenueShow {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

/// Shows partitioned around one instant
///
/// A show starting exactly at `now` is past.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowSplit<T> {
    pub past_shows: Vec<T>,
    pub upcoming_shows: Vec<T>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl<T: Scheduled> ShowSplit<T> {
    pub fn partition(shows: Vec<T>, now: DateTime<Utc>) -> Self {
        let (upcoming_shows, past_shows): (Vec<T>, Vec<T>) =
            shows.into_iter().partition(|show| show.start_time() > now);

        Self {
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }

    pub fn total(&self) -> usize {
        self.past_shows_count + self.upcoming_shows_count
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    #[serde(flatten)]
    pub shows: ShowSplit<ArtistShow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    #[serde(flatten)]
    pub shows: ShowSplit<VenueShow>,
}

/// Venue page: the venue plus its shows joined with each artist
///
/// The venue and its shows are read in one transaction.
pub async fn venue_detail(pool: &SqlitePool, id: i64, now: DateTime<Utc>) -> Result<VenueDetail> {
    let now = to_store_precision(now);
    let mut tx = pool.begin().await?;

    let venue = fetch_venue(&mut tx, id).await?;

    let shows = sqlx::query_as::<_, ArtistShow>(
        r#"
        SELECT s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
               s.start_time
        FROM shows s
        JOIN artists a ON a.id = s.artist_id
        WHERE s.venue_id = ?
        ORDER BY s.start_time, s.id
        "#,
    )
    .bind(id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(VenueDetail {
        venue,
        shows: ShowSplit::partition(shows, now),
    })
}

/// Artist page: the artist plus their shows joined with each venue
pub async fn artist_detail(pool: &SqlitePool, id: i64, now: DateTime<Utc>) -> Result<ArtistDetail> {
    let now = to_store_precision(now);
    let mut tx = pool.begin().await?;

    let artist = fetch_artist(&mut tx, id).await?;

    let shows = sqlx::query_as::<_, VenueShow>(
        r#"
        SELECT s.venue_id, v.name AS venue_name, v.image_link AS venue_image_link,
               s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        WHERE s.artist_id = ?
        ORDER BY s.start_time, s.id
        "#,
    )
    .bind(id)
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(ArtistDetail {
        artist,
        shows: ShowSplit::partition(shows, now),
    })
}
