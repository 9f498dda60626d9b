//! Grouped venue listing and flat show listing

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::EntitySummary;
use crate::time::to_store_precision;
use crate::Result;

/// Venues sharing one (city, state) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntitySummary>,
}

#[derive(Debug, FromRow)]
struct VenueAreaRow {
    id: i64,
    name: String,
    city: String,
    state: String,
    num_upcoming_shows: i64,
}

/// One row of the shows page
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Group every venue by (city, state)
///
/// Groups are ordered by city then state, venues inside a group by id.
/// Each venue appears in exactly one group.
pub async fn venue_areas(pool: &SqlitePool, now: DateTime<Utc>) -> Result<Vec<VenueArea>> {
    let rows = sqlx::query_as::<_, VenueAreaRow>(
        r#"
        SELECT v.id, v.name, v.city, v.state, COUNT(s.id) AS num_upcoming_shows
        FROM venues v
        LEFT JOIN shows s ON s.venue_id = v.id AND s.start_time > ?
        GROUP BY v.id
        ORDER BY v.city, v.state, v.id
        "#,
    )
    .bind(to_store_precision(now))
    .fetch_all(pool)
    .await?;

    Ok(group_by_area(rows))
}

/// Rows arrive sorted by (city, state), so a group ends when the pair changes
fn group_by_area(rows: Vec<VenueAreaRow>) -> Vec<VenueArea> {
    let mut areas: Vec<VenueArea> = Vec::new();

    for row in rows {
        let summary = EntitySummary {
            id: row.id,
            name: row.name,
            num_upcoming_shows: row.num_upcoming_shows,
        };

        match areas.last_mut() {
            Some(area) if area.city == row.city && area.state == row.state => {
                area.venues.push(summary);
            }
            _ => areas.push(VenueArea {
                city: row.city,
                state: row.state,
                venues: vec![summary],
            }),
        }
    }

    areas
}

/// Every show with its venue and artist display fields
pub async fn show_listing(pool: &SqlitePool) -> Result<Vec<ShowListing>> {
    let rows = sqlx::query_as::<_, ShowListing>(
        r#"
        SELECT s.venue_id, v.name AS venue_name,
               s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
               s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        JOIN artists a ON a.id = s.artist_id
        ORDER BY s.start_time, s.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, city: &str, state: &str) -> VenueAreaRow {
        VenueAreaRow {
            id,
            name: format!("Venue {}", id),
            city: city.to_string(),
            state: state.to_string(),
            num_upcoming_shows: 0,
        }
    }

    #[test]
    fn test_group_by_area_splits_on_pair_change() {
        let rows = vec![
            row(2, "New York", "NY"),
            row(5, "New York", "NY"),
            row(1, "San Francisco", "CA"),
        ];

        let areas = group_by_area(rows);
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].city, "New York");
        assert_eq!(areas[0].venues.len(), 2);
        assert_eq!(areas[1].state, "CA");
        assert_eq!(areas[1].venues[0].id, 1);
    }

    #[test]
    fn test_same_city_different_state_is_separate_group() {
        let rows = vec![row(1, "Portland", "ME"), row(2, "Portland", "OR")];

        let areas = group_by_area(rows);
        assert_eq!(areas.len(), 2);
    }

    #[test]
    fn test_group_by_area_empty() {
        assert!(group_by_area(Vec::new()).is_empty());
    }
}
