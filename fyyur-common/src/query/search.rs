//! Case-insensitive substring search on entity names

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use super::{entity_summaries, EntityKind, EntitySummary};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<EntitySummary>,
}

/// Venues whose name contains `term`, ignoring case
pub async fn search_venues(
    pool: &SqlitePool,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults> {
    search(pool, EntityKind::Venue, term, now).await
}

/// Artists whose name contains `term`, ignoring case
pub async fn search_artists(
    pool: &SqlitePool,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults> {
    search(pool, EntityKind::Artist, term, now).await
}

/// Name search for either entity kind
///
/// Matching uses Unicode lowercase folding; `%` and `_` in the term are
/// literal. Results keep store (id) order.
pub async fn search(
    pool: &SqlitePool,
    kind: EntityKind,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults> {
    let summaries = entity_summaries(pool, kind, now).await?;
    let data = filter_by_name(summaries, term);

    Ok(SearchResults {
        count: data.len(),
        data,
    })
}

fn filter_by_name(summaries: Vec<EntitySummary>, term: &str) -> Vec<EntitySummary> {
    let needle = term.to_lowercase();
    summaries
        .into_iter()
        .filter(|s| s.name.to_lowercase().contains(&needle))
        .collect()
}
