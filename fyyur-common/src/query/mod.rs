//! Aggregate query layer
//!
//! Builds the read-only view models the web pages render: venues grouped
//! by area, detail pages with a past/upcoming show split, name search and
//! the flat show listing.
//!
//! Every function takes the store handle and a single `now` captured by
//! the caller. All "upcoming" decisions inside one call compare against
//! that same instant.

pub mod detail;
pub mod listing;
pub mod search;

pub use detail::*;
pub use listing::*;
pub use search::*;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::time::to_store_precision;
use crate::Result;

/// Which side of the show relationship a query is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Venue,
    Artist,
}

impl EntityKind {
    fn table(self) -> &'static str {
        match self {
            EntityKind::Venue => "venues",
            EntityKind::Artist => "artists",
        }
    }

    fn show_column(self) -> &'static str {
        match self {
            EntityKind::Venue => "venue_id",
            EntityKind::Artist => "artist_id",
        }
    }
}

/// Entity id and name with its upcoming show count
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct EntitySummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Every entity of `kind` in id order, annotated with shows after `now`
pub(crate) async fn entity_summaries(
    pool: &SqlitePool,
    kind: EntityKind,
    now: DateTime<Utc>,
) -> Result<Vec<EntitySummary>> {
    let sql = format!(
        r#"
        SELECT e.id, e.name, COUNT(s.id) AS num_upcoming_shows
        FROM {table} e
        LEFT JOIN shows s ON s.{column} = e.id AND s.start_time > ?
        GROUP BY e.id
        ORDER BY e.id
        "#,
        table = kind.table(),
        column = kind.show_column(),
    );

    let rows = sqlx::query_as::<_, EntitySummary>(&sql)
        .bind(to_store_precision(now))
        .fetch_all(pool)
        .await?;

    Ok(rows)
}
