//! HTML page templates
//!
//! Handlers convert query-layer view models into the display structs here
//! (preformatted times, link targets) so the templates only walk fields.

use askama::Template;
use chrono::{DateTime, Utc};
use fyyur_common::db::{Artist, Venue};
use fyyur_common::query::{
    ArtistDetail, ArtistShow, EntitySummary, SearchResults, ShowListing, ShowSplit, VenueArea,
    VenueDetail, VenueShow,
};

use crate::forms::{format_yes_no, ListingForm};

/// `Sat 05, 21, 2019 9:30PM`
pub fn format_medium(instant: DateTime<Utc>) -> String {
    instant.format("%a %m, %d, %Y %-I:%M%p").to_string()
}

/// `Saturday May, 21, 2019 at 9:30PM`
pub fn format_full(instant: DateTime<Utc>) -> String {
    instant.format("%A %B, %-d, %Y at %-I:%M%p").to_string()
}

/// A show as listed on a venue or artist page
#[derive(Debug, Clone, PartialEq)]
pub struct ShowCard {
    pub link: String,
    pub name: String,
    pub image_link: Option<String>,
    pub start_time: String,
}

impl From<&ArtistShow> for ShowCard {
    fn from(show: &ArtistShow) -> Self {
        Self {
            link: format!("/artists/{}", show.artist_id),
            name: show.artist_name.clone(),
            image_link: show.artist_image_link.clone(),
            start_time: format_medium(show.start_time),
        }
    }
}

impl From<&VenueShow> for ShowCard {
    fn from(show: &VenueShow) -> Self {
        Self {
            link: format!("/venues/{}", show.venue_id),
            name: show.venue_name.clone(),
            image_link: show.venue_image_link.clone(),
            start_time: format_medium(show.start_time),
        }
    }
}

/// A row of the flat show listing
#[derive(Debug, Clone, PartialEq)]
pub struct ShowRow {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

impl From<&ShowListing> for ShowRow {
    fn from(show: &ShowListing) -> Self {
        Self {
            venue_id: show.venue_id,
            venue_name: show.venue_name.clone(),
            artist_id: show.artist_id,
            artist_name: show.artist_name.clone(),
            artist_image_link: show.artist_image_link.clone(),
            start_time: format_full(show.start_time),
        }
    }
}

/// Past and upcoming show cards with their counts
#[derive(Debug, Clone, Default)]
pub struct ShowCards {
    pub past: Vec<ShowCard>,
    pub upcoming: Vec<ShowCard>,
    pub past_count: usize,
    pub upcoming_count: usize,
}

impl<T> From<&ShowSplit<T>> for ShowCards
where
    for<'a> ShowCard: From<&'a T>,
{
    fn from(split: &ShowSplit<T>) -> Self {
        Self {
            past: split.past_shows.iter().map(ShowCard::from).collect(),
            upcoming: split.upcoming_shows.iter().map(ShowCard::from).collect(),
            past_count: split.past_shows_count,
            upcoming_count: split.upcoming_shows_count,
        }
    }
}

/// Profile fields shared by the venue and artist pages
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking: bool,
    pub seeking_description: Option<String>,
}

impl From<&Venue> for Profile {
    fn from(venue: &Venue) -> Self {
        Self {
            id: venue.id,
            name: venue.name.clone(),
            genres: venue.genres.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone(),
            website: venue.website.clone(),
            facebook_link: venue.facebook_link.clone(),
            image_link: venue.image_link.clone(),
            seeking: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone(),
        }
    }
}

impl From<&Artist> for Profile {
    fn from(artist: &Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.name.clone(),
            genres: artist.genres.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            address: None,
            phone: artist.phone.clone(),
            website: artist.website.clone(),
            facebook_link: artist.facebook_link.clone(),
            image_link: artist.image_link.clone(),
            seeking: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone(),
        }
    }
}

impl Profile {
    pub fn seeking_answer(&self) -> &'static str {
        format_yes_no(self.seeking)
    }
}

#[derive(Template, Default)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub notice: Option<String>,
}

#[derive(Template)]
#[template(path = "pages/venues.html")]
pub struct VenuesTemplate {
    pub notice: Option<String>,
    pub areas: Vec<VenueArea>,
}

#[derive(Template)]
#[template(path = "pages/artists.html")]
pub struct ArtistsTemplate {
    pub notice: Option<String>,
    pub artists: Vec<(i64, String)>,
}

#[derive(Template)]
#[template(path = "pages/search.html")]
pub struct SearchTemplate {
    pub notice: Option<String>,
    /// "venues" or "artists"; used for result links
    pub section: &'static str,
    pub search_term: String,
    pub count: usize,
    pub results: Vec<EntitySummary>,
}

impl SearchTemplate {
    pub fn new(
        notice: Option<String>,
        section: &'static str,
        search_term: String,
        results: SearchResults,
    ) -> Self {
        Self {
            notice,
            section,
            search_term,
            count: results.count,
            results: results.data,
        }
    }
}

/// Venue or artist detail page
#[derive(Template)]
#[template(path = "pages/profile.html")]
pub struct ProfileTemplate {
    pub notice: Option<String>,
    /// "venues" or "artists"
    pub section: &'static str,
    pub seeking_label: &'static str,
    pub profile: Profile,
    pub shows: ShowCards,
}

impl ProfileTemplate {
    pub fn venue(notice: Option<String>, detail: &VenueDetail) -> Self {
        Self {
            notice,
            section: "venues",
            seeking_label: "Seeking Talent",
            profile: Profile::from(&detail.venue),
            shows: ShowCards::from(&detail.shows),
        }
    }

    pub fn artist(notice: Option<String>, detail: &ArtistDetail) -> Self {
        Self {
            notice,
            section: "artists",
            seeking_label: "Seeking Venue",
            profile: Profile::from(&detail.artist),
            shows: ShowCards::from(&detail.shows),
        }
    }
}

#[derive(Template)]
#[template(path = "pages/shows.html")]
pub struct ShowsTemplate {
    pub notice: Option<String>,
    pub shows: Vec<ShowRow>,
}

#[derive(Template)]
#[template(path = "forms/listing.html")]
pub struct ListingFormTemplate {
    pub notice: Option<String>,
    pub form: ListingForm,
}

#[derive(Template)]
#[template(path = "forms/show.html")]
pub struct ShowFormTemplate {
    pub notice: Option<String>,
    pub venues: Vec<(i64, String)>,
    pub artists: Vec<(i64, String)>,
}

#[derive(Template, Default)]
#[template(path = "errors/404.html")]
pub struct NotFoundTemplate {
    pub notice: Option<String>,
}

#[derive(Template, Default)]
#[template(path = "errors/500.html")]
pub struct ServerErrorTemplate {
    pub notice: Option<String>,
}
