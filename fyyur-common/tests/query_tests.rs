//! Integration tests for the aggregate query layer
//!
//! Tests cover:
//! - Grouped venue listing (coverage, grouping key, upcoming counts)
//! - Detail views with the past/upcoming split
//! - Name search
//! - Flat show listing

use chrono::{DateTime, Duration, TimeZone, Utc};
use fyyur_common::db::{
    count_artists, count_venues, delete_venue, init_database, insert_artist, insert_show,
    insert_venue, Artist, ArtistDraft, NewShow, Venue, VenueDraft,
};
use fyyur_common::query::{
    artist_detail, search_artists, search_venues, show_listing, venue_areas, venue_detail,
};
use fyyur_common::{time, Error};
use sqlx::SqlitePool;
use std::collections::HashSet;
use tempfile::TempDir;

async fn setup_db() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let pool = init_database(&dir.path().join("fyyur.db"))
        .await
        .expect("Failed to initialize database");
    (dir, pool)
}

async fn add_venue(pool: &SqlitePool, name: &str, city: &str, state: &str) -> Venue {
    insert_venue(
        pool,
        &VenueDraft {
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            ..Default::default()
        },
    )
    .await
    .expect("insert venue")
}

async fn add_artist(pool: &SqlitePool, name: &str) -> Artist {
    insert_artist(
        pool,
        &ArtistDraft {
            name: name.to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            image_link: Some(format!("https://img.example/{}.jpg", name.len())),
            ..Default::default()
        },
    )
    .await
    .expect("insert artist")
}

async fn add_show(pool: &SqlitePool, venue: &Venue, artist: &Artist, start_time: DateTime<Utc>) {
    insert_show(
        pool,
        &NewShow {
            venue_id: venue.id,
            artist_id: artist.id,
            start_time,
        },
    )
    .await
    .expect("insert show");
}

fn upcoming_for(areas: &[fyyur_common::query::VenueArea], id: i64) -> i64 {
    areas
        .iter()
        .flat_map(|a| a.venues.iter())
        .find(|v| v.id == id)
        .map(|v| v.num_upcoming_shows)
        .expect("venue present in listing")
}

#[tokio::test]
async fn test_single_venue_scenario() {
    let (_dir, pool) = setup_db().await;

    let spot = add_venue(&pool, "The Spot", "SF", "CA").await;
    let artist = add_artist(&pool, "X").await;
    add_show(&pool, &spot, &artist, time::now() + Duration::days(365)).await;

    let areas = venue_areas(&pool, time::now()).await.unwrap();
    assert_eq!(areas.len(), 1);
    assert_eq!(areas[0].city, "SF");
    assert_eq!(areas[0].state, "CA");
    assert_eq!(areas[0].venues.len(), 1);
    assert_eq!(areas[0].venues[0].name, "The Spot");
    assert_eq!(areas[0].venues[0].num_upcoming_shows, 1);
}

#[tokio::test]
async fn test_grouped_listing_covers_every_venue_once() {
    let (_dir, pool) = setup_db().await;

    let mut ids = HashSet::new();
    for (name, city, state) in [
        ("The Musical Hop", "San Francisco", "CA"),
        ("The Dueling Pianos Bar", "New York", "NY"),
        ("Park Square Live Music & Coffee", "San Francisco", "CA"),
        ("Portland Hall", "Portland", "OR"),
        ("Portland Cellar", "Portland", "ME"),
    ] {
        ids.insert(add_venue(&pool, name, city, state).await.id);
    }

    let areas = venue_areas(&pool, time::now()).await.unwrap();

    let listed: Vec<i64> = areas
        .iter()
        .flat_map(|a| a.venues.iter().map(|v| v.id))
        .collect();
    assert_eq!(listed.len(), ids.len(), "no duplicates, no omissions");
    assert_eq!(listed.iter().copied().collect::<HashSet<_>>(), ids);

    // (city, state) pairs are unique across groups
    let keys: HashSet<(String, String)> = areas
        .iter()
        .map(|a| (a.city.clone(), a.state.clone()))
        .collect();
    assert_eq!(keys.len(), areas.len());
    assert_eq!(areas.len(), 4);
}

#[tokio::test]
async fn test_grouped_listing_is_deterministic() {
    let (_dir, pool) = setup_db().await;

    add_venue(&pool, "B", "Austin", "TX").await;
    add_venue(&pool, "A", "Boston", "MA").await;
    add_venue(&pool, "C", "Austin", "TX").await;

    let now = time::now();
    let first = venue_areas(&pool, now).await.unwrap();
    let second = venue_areas(&pool, now).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first[0].city, "Austin");
    assert_eq!(first[0].venues[0].name, "B");
    assert_eq!(first[0].venues[1].name, "C");
}

#[tokio::test]
async fn test_upcoming_count_tracks_future_shows_only() {
    let (_dir, pool) = setup_db().await;

    let venue = add_venue(&pool, "The Spot", "SF", "CA").await;
    let artist = add_artist(&pool, "Guns N Petals").await;

    let before = upcoming_for(&venue_areas(&pool, time::now()).await.unwrap(), venue.id);
    assert_eq!(before, 0);

    add_show(&pool, &venue, &artist, time::now() + Duration::days(10)).await;
    let after_future = upcoming_for(&venue_areas(&pool, time::now()).await.unwrap(), venue.id);
    assert_eq!(after_future, before + 1);

    add_show(&pool, &venue, &artist, time::now() - Duration::days(10)).await;
    let after_past = upcoming_for(&venue_areas(&pool, time::now()).await.unwrap(), venue.id);
    assert_eq!(after_past, after_future);
}

#[tokio::test]
async fn test_venue_detail_split_counts() {
    let (_dir, pool) = setup_db().await;

    let venue = add_venue(&pool, "The Musical Hop", "San Francisco", "CA").await;
    let artist = add_artist(&pool, "Guns N Petals").await;
    let now = time::now();

    add_show(&pool, &venue, &artist, now - Duration::days(400)).await;
    add_show(&pool, &venue, &artist, now - Duration::hours(2)).await;
    add_show(&pool, &venue, &artist, now + Duration::days(3)).await;

    let detail = venue_detail(&pool, venue.id, now).await.unwrap();
    assert_eq!(detail.venue.name, "The Musical Hop");
    assert_eq!(detail.shows.past_shows_count, 2);
    assert_eq!(detail.shows.upcoming_shows_count, 1);
    assert_eq!(
        detail.shows.past_shows_count + detail.shows.upcoming_shows_count,
        3
    );

    let upcoming = &detail.shows.upcoming_shows[0];
    assert_eq!(upcoming.artist_id, artist.id);
    assert_eq!(upcoming.artist_name, "Guns N Petals");
    assert_eq!(upcoming.artist_image_link, artist.image_link);
}

#[tokio::test]
async fn test_show_at_query_instant_counts_as_past() {
    let (_dir, pool) = setup_db().await;

    let venue = add_venue(&pool, "The Spot", "SF", "CA").await;
    let artist = add_artist(&pool, "Matt Quevedo").await;
    let now = time::now();
    add_show(&pool, &venue, &artist, now).await;

    let detail = artist_detail(&pool, artist.id, now).await.unwrap();
    assert_eq!(detail.shows.past_shows_count, 1);
    assert_eq!(detail.shows.upcoming_shows_count, 0);

    let areas = venue_areas(&pool, now).await.unwrap();
    assert_eq!(upcoming_for(&areas, venue.id), 0);
}

#[tokio::test]
async fn test_listing_and_detail_agree_on_latest_storable_year() {
    let (_dir, pool) = setup_db().await;

    let venue = add_venue(&pool, "The Spot", "SF", "CA").await;
    let artist = add_artist(&pool, "Matt Quevedo").await;
    add_show(&pool, &venue, &artist, Utc.with_ymd_and_hms(9999, 12, 31, 20, 0, 0).unwrap()).await;
    let now = time::now();

    let detail = venue_detail(&pool, venue.id, now).await.unwrap();
    let areas = venue_areas(&pool, now).await.unwrap();
    let found = search_venues(&pool, "spot", now).await.unwrap();

    assert_eq!(detail.shows.upcoming_shows_count, 1);
    assert_eq!(upcoming_for(&areas, venue.id), 1);
    assert_eq!(found.data[0].num_upcoming_shows, 1);
}

#[tokio::test]
async fn test_artist_detail_joins_venue_fields() {
    let (_dir, pool) = setup_db().await;

    let venue = add_venue(&pool, "The Dueling Pianos Bar", "New York", "NY").await;
    let artist = add_artist(&pool, "The Wild Sax Band").await;
    add_show(&pool, &venue, &artist, time::now() + Duration::days(1)).await;

    let detail = artist_detail(&pool, artist.id, time::now()).await.unwrap();
    assert_eq!(detail.artist.id, artist.id);
    assert_eq!(detail.shows.upcoming_shows.len(), 1);
    assert_eq!(detail.shows.upcoming_shows[0].venue_id, venue.id);
    assert_eq!(detail.shows.upcoming_shows[0].venue_name, "The Dueling Pianos Bar");
}

#[tokio::test]
async fn test_detail_missing_id_is_not_found() {
    let (_dir, pool) = setup_db().await;

    let now = time::now();
    assert!(matches!(venue_detail(&pool, 77, now).await, Err(Error::NotFound(_))));
    assert!(matches!(artist_detail(&pool, 77, now).await, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_seeking_description_roundtrip_through_detail() {
    let (_dir, pool) = setup_db().await;

    let venue = insert_venue(
        &pool,
        &VenueDraft {
            name: "The Spot".to_string(),
            city: "SF".to_string(),
            state: "CA".to_string(),
            seeking_talent: true,
            seeking_description: Some("Jazz trio wanted".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let detail = venue_detail(&pool, venue.id, time::now()).await.unwrap();
    assert!(detail.venue.seeking_talent);
    assert_eq!(detail.venue.seeking_description.as_deref(), Some("Jazz trio wanted"));
}

#[tokio::test]
async fn test_search_empty_term_returns_everything() {
    let (_dir, pool) = setup_db().await;

    add_venue(&pool, "The Musical Hop", "San Francisco", "CA").await;
    add_venue(&pool, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
    add_artist(&pool, "Guns N Petals").await;

    let now = time::now();
    let venues = search_venues(&pool, "", now).await.unwrap();
    assert_eq!(venues.count as i64, count_venues(&pool).await.unwrap());

    let artists = search_artists(&pool, "", now).await.unwrap();
    assert_eq!(artists.count as i64, count_artists(&pool).await.unwrap());
}

#[tokio::test]
async fn test_search_no_match() {
    let (_dir, pool) = setup_db().await;

    add_venue(&pool, "The Musical Hop", "San Francisco", "CA").await;

    let results = search_venues(&pool, "nothing like this", time::now()).await.unwrap();
    assert_eq!(results.count, 0);
    assert!(results.data.is_empty());
}

#[tokio::test]
async fn test_search_case_insensitive_with_upcoming_counts() {
    let (_dir, pool) = setup_db().await;

    let hop = add_venue(&pool, "The Musical Hop", "San Francisco", "CA").await;
    add_venue(&pool, "The Dueling Pianos Bar", "New York", "NY").await;
    let park = add_venue(&pool, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
    let artist = add_artist(&pool, "Guns N Petals").await;
    add_show(&pool, &park, &artist, time::now() + Duration::days(5)).await;

    let results = search_venues(&pool, "mUsIc", time::now()).await.unwrap();
    assert_eq!(results.count, 2);
    assert_eq!(results.data[0].id, hop.id);
    assert_eq!(results.data[0].num_upcoming_shows, 0);
    assert_eq!(results.data[1].id, park.id);
    assert_eq!(results.data[1].num_upcoming_shows, 1);
}

#[tokio::test]
async fn test_show_listing_denormalizes_names() {
    let (_dir, pool) = setup_db().await;

    let venue = add_venue(&pool, "The Musical Hop", "San Francisco", "CA").await;
    let sax = add_artist(&pool, "The Wild Sax Band").await;
    let petals = add_artist(&pool, "Guns N Petals").await;
    let now = time::now();
    add_show(&pool, &venue, &sax, now + Duration::days(2)).await;
    add_show(&pool, &venue, &petals, now - Duration::days(2)).await;

    let shows = show_listing(&pool).await.unwrap();
    assert_eq!(shows.len(), 2);
    // Ordered by start time
    assert_eq!(shows[0].artist_name, "Guns N Petals");
    assert_eq!(shows[1].artist_name, "The Wild Sax Band");
    assert_eq!(shows[1].venue_name, "The Musical Hop");
    assert_eq!(shows[1].artist_image_link, sax.image_link);
}

#[tokio::test]
async fn test_deleted_venue_disappears_from_listing_and_shows() {
    let (_dir, pool) = setup_db().await;

    let venue = add_venue(&pool, "The Spot", "SF", "CA").await;
    let artist = add_artist(&pool, "X").await;
    add_show(&pool, &venue, &artist, time::now() + Duration::days(1)).await;

    delete_venue(&pool, venue.id).await.unwrap();

    assert!(venue_areas(&pool, time::now()).await.unwrap().is_empty());
    assert!(show_listing(&pool).await.unwrap().is_empty());
    let detail = artist_detail(&pool, artist.id, time::now()).await.unwrap();
    assert_eq!(detail.shows.total(), 0);
}
