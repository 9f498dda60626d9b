//! Form decoding and validation
//!
//! The HTML forms encode booleans as "Yes"/"No" and genres either as
//! repeated fields or as one brace-delimited comma list. Those encodings
//! stop here: everything past this module sees native booleans and
//! ordered string lists.

use chrono::{DateTime, NaiveDateTime, Utc};
use fyyur_common::db::{Artist, ArtistDraft, NewShow, Venue, VenueDraft};
use fyyur_common::{time, Error, Result};

/// Genre choices offered by the forms
pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// US state and territory codes accepted in the state field
pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

const TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Raw submitted fields in submission order
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value for `key`, trimmed; blank values count as absent
    pub fn text(&self, key: &str) -> Option<String> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Every value submitted for `key`
    pub fn all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// "Yes" (any case) is true; anything else, including absence, is false
pub fn parse_yes_no(value: Option<&str>) -> bool {
    value.map_or(false, |v| v.trim().eq_ignore_ascii_case("yes"))
}

pub fn format_yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Decode genre fields into an ordered list without blanks or repeats
///
/// Accepts `genres=Jazz&genres=Folk`, `genres=Jazz,Folk` and the
/// brace-delimited `{Jazz,"Rock n Roll"}` form.
pub fn parse_genres<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut genres: Vec<String> = Vec::new();

    for value in values {
        let value = value.trim();
        let value = value.strip_prefix('{').unwrap_or(value);
        let value = value.strip_suffix('}').unwrap_or(value);

        for part in value.split(',') {
            let genre = part.trim().trim_matches('"').trim();
            if !genre.is_empty() && !genres.iter().any(|g| g == genre) {
                genres.push(genre.to_string());
            }
        }
    }

    genres
}

/// Parse a submitted show time; naive values are taken as UTC
///
/// Years must have four digits; `%Y` alone would also accept `+10000`.
pub fn parse_start_time(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();

    let instant = DateTime::parse_from_rfc3339(value)
        .map(|instant| instant.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            TIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|naive| naive.and_utc())
        })
        .ok_or_else(|| Error::Validation(format!("start time '{}' is not a valid date", value)))?;

    if !time::is_storable(instant) {
        return Err(Error::Validation(format!(
            "start time '{}' must have a year between 0000 and 9999",
            value
        )));
    }

    Ok(instant)
}

/// Fields shared by the venue and artist forms
struct ListingFields {
    name: String,
    city: String,
    state: String,
    phone: Option<String>,
    website: Option<String>,
    facebook_link: Option<String>,
    image_link: Option<String>,
    genres: Vec<String>,
    seeking_description: Option<String>,
}

fn listing_fields(fields: &FormFields, problems: &mut Vec<String>) -> ListingFields {
    let name = required(fields, "name", problems);
    let city = required(fields, "city", problems);
    let state = required(fields, "state", problems).to_uppercase();
    if !state.is_empty() && !STATES.contains(&state.as_str()) {
        problems.push(format!("state '{}' is not a US state code", state));
    }

    ListingFields {
        name,
        city,
        state,
        phone: fields.text("phone"),
        website: link(fields, "website", problems),
        facebook_link: link(fields, "facebook_link", problems),
        image_link: link(fields, "image_link", problems),
        genres: parse_genres(fields.all("genres")),
        seeking_description: fields.text("seeking_description"),
    }
}

fn required(fields: &FormFields, key: &str, problems: &mut Vec<String>) -> String {
    fields.text(key).unwrap_or_else(|| {
        problems.push(format!("{} is required", key));
        String::new()
    })
}

fn link(fields: &FormFields, key: &str, problems: &mut Vec<String>) -> Option<String> {
    let value = fields.text(key)?;
    if value.starts_with("http://") || value.starts_with("https://") {
        Some(value)
    } else {
        problems.push(format!("{} must be an http(s) URL", key));
        None
    }
}

fn finish<T>(value: T, problems: Vec<String>) -> Result<T> {
    if problems.is_empty() {
        Ok(value)
    } else {
        Err(Error::Validation(problems.join("; ")))
    }
}

/// Decode and validate a venue create/edit submission
pub fn venue_draft_from_form(fields: &FormFields) -> Result<VenueDraft> {
    let mut problems = Vec::new();
    let common = listing_fields(fields, &mut problems);

    let draft = VenueDraft {
        name: common.name,
        city: common.city,
        state: common.state,
        address: fields.text("address"),
        phone: common.phone,
        website: common.website,
        facebook_link: common.facebook_link,
        image_link: common.image_link,
        genres: common.genres,
        seeking_talent: parse_yes_no(fields.text("seeking_talent").as_deref()),
        seeking_description: common.seeking_description,
    };

    finish(draft, problems)
}

/// Decode and validate an artist create/edit submission
pub fn artist_draft_from_form(fields: &FormFields) -> Result<ArtistDraft> {
    let mut problems = Vec::new();
    let common = listing_fields(fields, &mut problems);

    let draft = ArtistDraft {
        name: common.name,
        city: common.city,
        state: common.state,
        phone: common.phone,
        website: common.website,
        facebook_link: common.facebook_link,
        image_link: common.image_link,
        genres: common.genres,
        seeking_venue: parse_yes_no(fields.text("seeking_venue").as_deref()),
        seeking_description: common.seeking_description,
    };

    finish(draft, problems)
}

/// Decode and validate a show submission
pub fn new_show_from_form(fields: &FormFields) -> Result<NewShow> {
    let mut problems = Vec::new();

    let venue_id = positive_id(fields, "venue_id", &mut problems);
    let artist_id = positive_id(fields, "artist_id", &mut problems);
    let start_time = match fields.text("start_time") {
        Some(raw) => match parse_start_time(&raw) {
            Ok(instant) => Some(instant),
            Err(e) => {
                problems.push(e.to_string());
                None
            }
        },
        None => {
            problems.push("start_time is required".to_string());
            None
        }
    };

    match (venue_id, artist_id, start_time) {
        (Some(venue_id), Some(artist_id), Some(start_time)) if problems.is_empty() => Ok(NewShow {
            venue_id,
            artist_id,
            start_time,
        }),
        _ => Err(Error::Validation(problems.join("; "))),
    }
}

fn positive_id(fields: &FormFields, key: &str, problems: &mut Vec<String>) -> Option<i64> {
    match fields.text(key).map(|raw| raw.parse::<i64>()) {
        Some(Ok(id)) if id > 0 => Some(id),
        Some(_) => {
            problems.push(format!("{} must be a positive integer", key));
            None
        }
        None => {
            problems.push(format!("{} is required", key));
            None
        }
    }
}

/// One `<option>` of a select field
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

/// Values used to render the venue or artist form
#[derive(Debug, Clone)]
pub struct ListingForm {
    /// "Venue" or "Artist"
    pub kind: &'static str,
    /// Form POST target
    pub action: String,
    /// True when editing an existing record
    pub editing: bool,
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub phone: String,
    pub website: String,
    pub facebook_link: String,
    pub image_link: String,
    pub seeking_field: &'static str,
    pub seeking_label: &'static str,
    pub seeking_description: String,
    pub state_options: Vec<SelectOption>,
    pub genre_options: Vec<SelectOption>,
    pub seeking_options: Vec<SelectOption>,
}

impl ListingForm {
    pub fn new_venue() -> Self {
        Self::venue_form("/venues/create".to_string(), false, &VenueDraft::default())
    }

    pub fn edit_venue(venue: &Venue) -> Self {
        Self::venue_form(
            format!("/venues/{}/edit", venue.id),
            true,
            &VenueDraft::from(venue),
        )
    }

    pub fn new_artist() -> Self {
        Self::artist_form("/artists/create".to_string(), false, &ArtistDraft::default())
    }

    pub fn edit_artist(artist: &Artist) -> Self {
        Self::artist_form(
            format!("/artists/{}/edit", artist.id),
            true,
            &ArtistDraft::from(artist),
        )
    }

    fn venue_form(action: String, editing: bool, draft: &VenueDraft) -> Self {
        Self {
            kind: "Venue",
            action,
            editing,
            name: draft.name.clone(),
            city: draft.city.clone(),
            address: Some(draft.address.clone().unwrap_or_default()),
            phone: draft.phone.clone().unwrap_or_default(),
            website: draft.website.clone().unwrap_or_default(),
            facebook_link: draft.facebook_link.clone().unwrap_or_default(),
            image_link: draft.image_link.clone().unwrap_or_default(),
            seeking_field: "seeking_talent",
            seeking_label: "Seeking Talent",
            seeking_description: draft.seeking_description.clone().unwrap_or_default(),
            state_options: state_options(&draft.state),
            genre_options: genre_options(&draft.genres),
            seeking_options: seeking_options(draft.seeking_talent),
        }
    }

    fn artist_form(action: String, editing: bool, draft: &ArtistDraft) -> Self {
        Self {
            kind: "Artist",
            action,
            editing,
            name: draft.name.clone(),
            city: draft.city.clone(),
            address: None,
            phone: draft.phone.clone().unwrap_or_default(),
            website: draft.website.clone().unwrap_or_default(),
            facebook_link: draft.facebook_link.clone().unwrap_or_default(),
            image_link: draft.image_link.clone().unwrap_or_default(),
            seeking_field: "seeking_venue",
            seeking_label: "Seeking Venue",
            seeking_description: draft.seeking_description.clone().unwrap_or_default(),
            state_options: state_options(&draft.state),
            genre_options: genre_options(&draft.genres),
            seeking_options: seeking_options(draft.seeking_venue),
        }
    }
}

fn state_options(current: &str) -> Vec<SelectOption> {
    STATES
        .iter()
        .map(|state| SelectOption {
            value: state.to_string(),
            selected: *state == current,
        })
        .collect()
}

/// Known genres first, then any stored genre outside the list
fn genre_options(current: &[String]) -> Vec<SelectOption> {
    let mut options: Vec<SelectOption> = GENRES
        .iter()
        .map(|genre| SelectOption {
            value: genre.to_string(),
            selected: current.iter().any(|g| g == genre),
        })
        .collect();

    for genre in current {
        if !GENRES.contains(&genre.as_str()) {
            options.push(SelectOption {
                value: genre.clone(),
                selected: true,
            });
        }
    }

    options
}

fn seeking_options(seeking: bool) -> Vec<SelectOption> {
    [true, false]
        .into_iter()
        .map(|value| SelectOption {
            value: format_yes_no(value).to_string(),
            selected: value == seeking,
        })
        .collect()
}
