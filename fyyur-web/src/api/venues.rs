//! Venue pages: grouped listing, search, detail, create, edit and delete

use axum::{
    extract::{Path, State},
    response::Response,
    routing::{get, post},
    Form, Router,
};
use fyyur_common::{db, query, time};

use super::{
    merge_notices, notice_for, parse_id, redirect_with_notice, render_page, success_with_notice,
};
use crate::error::WebResult;
use crate::flash::Flash;
use crate::forms::{venue_draft_from_form, FormFields, ListingForm};
use crate::templates::{
    HomeTemplate, ListingFormTemplate, ProfileTemplate, SearchTemplate, VenuesTemplate,
};
use crate::AppState;

/// GET /venues
pub async fn list_venues(State(state): State<AppState>, flash: Flash) -> WebResult<Response> {
    let now = time::now();
    let areas = query::venue_areas(&state.db, now).await?;

    let pending = flash.is_pending();
    render_page(
        VenuesTemplate {
            notice: flash.take(),
            areas,
        },
        pending,
    )
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    flash: Flash,
    Form(pairs): Form<Vec<(String, String)>>,
) -> WebResult<Response> {
    let search_term = FormFields::new(pairs).text("search_term").unwrap_or_default();
    let now = time::now();
    let results = query::search_venues(&state.db, &search_term, now).await?;

    let pending = flash.is_pending();
    render_page(
        SearchTemplate::new(flash.take(), "venues", search_term, results),
        pending,
    )
}

/// GET /venues/:id
pub async fn show_venue(
    State(state): State<AppState>,
    flash: Flash,
    Path(raw_id): Path<String>,
) -> WebResult<Response> {
    let id = parse_id(&raw_id, "venue")?;
    let now = time::now();
    let detail = query::venue_detail(&state.db, id, now).await?;

    let pending = flash.is_pending();
    render_page(ProfileTemplate::venue(flash.take(), &detail), pending)
}

/// GET /venues/create
pub async fn create_venue_form(flash: Flash) -> WebResult<Response> {
    let pending = flash.is_pending();
    render_page(
        ListingFormTemplate {
            notice: flash.take(),
            form: ListingForm::new_venue(),
        },
        pending,
    )
}

/// POST /venues/create
///
/// Renders the landing page with the outcome notice.
pub async fn create_venue(
    State(state): State<AppState>,
    flash: Flash,
    Form(pairs): Form<Vec<(String, String)>>,
) -> WebResult<Response> {
    let fields = FormFields::new(pairs);
    let name = fields.text("name").unwrap_or_default();

    let outcome = match venue_draft_from_form(&fields) {
        Ok(draft) => db::insert_venue(&state.db, &draft).await,
        Err(err) => Err(err),
    };
    let notice = notice_for(
        &outcome,
        |venue| format!("Venue {} was successfully listed!", venue.name),
        format!("An error occurred. Venue {} could not be listed.", name),
    );

    let pending = flash.is_pending();
    render_page(
        HomeTemplate {
            notice: Some(merge_notices(flash.take(), notice)),
        },
        pending,
    )
}

/// GET /venues/:id/edit
pub async fn edit_venue_form(
    State(state): State<AppState>,
    flash: Flash,
    Path(raw_id): Path<String>,
) -> WebResult<Response> {
    let id = parse_id(&raw_id, "venue")?;
    let venue = db::get_venue(&state.db, id).await?;

    let pending = flash.is_pending();
    render_page(
        ListingFormTemplate {
            notice: flash.take(),
            form: ListingForm::edit_venue(&venue),
        },
        pending,
    )
}

/// POST /venues/:id/edit
///
/// Overwrites every editable field, then redirects to the venue page.
pub async fn edit_venue(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> WebResult<Response> {
    let id = parse_id(&raw_id, "venue")?;
    let fields = FormFields::new(pairs);
    let name = fields.text("name").unwrap_or_default();

    let outcome = match venue_draft_from_form(&fields) {
        Ok(draft) => db::update_venue(&state.db, id, &draft).await,
        Err(err) => Err(err),
    };
    let notice = notice_for(
        &outcome,
        |venue| format!("Venue {} was successfully updated!", venue.name),
        format!("An error occurred. Venue {} could not be updated.", name),
    );

    Ok(redirect_with_notice(&format!("/venues/{}", id), &notice))
}

/// DELETE /venues/:id
///
/// Removes the venue and its shows. Answers `{"success": true}` whatever
/// the outcome; the notice tells the user what happened.
pub async fn delete_venue(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    let outcome = match raw_id.parse::<i64>() {
        Ok(id) => db::delete_venue(&state.db, id).await,
        Err(_) => Err(fyyur_common::Error::NotFound(format!("venue {}", raw_id))),
    };

    let notice = notice_for(
        &outcome,
        |deleted| format!("Venue {} was successfully deleted.", deleted.record.name),
        format!("An error occurred. Venue {} could not be deleted.", raw_id),
    );

    success_with_notice(&notice)
}

/// Build venue routes
pub fn venue_routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(create_venue_form).post(create_venue))
        .route("/venues/:id", get(show_venue).delete(delete_venue))
        .route("/venues/:id/edit", get(edit_venue_form).post(edit_venue))
}
