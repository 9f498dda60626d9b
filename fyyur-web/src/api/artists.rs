//! Artist pages: listing, search, detail, create, edit and delete

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
use crate::forms::{artist_draft_from_form, FormFields, ListingForm};
use crate::templates::{
    ArtistsTemplate, HomeTemplate, ListingFormTemplate, ProfileTemplate, SearchTemplate,
};
use crate::AppState;

/// GET /artists
pub async fn list_artists(State(state): State<AppState>, flash: Flash) -> WebResult<Response> {
    let artists = db::list_artists(&state.db).await?;

    let pending = flash.is_pending();
    render_page(
        ArtistsTemplate {
            notice: flash.take(),
            artists,
        },
        pending,
    )
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    flash: Flash,
    Form(pairs): Form<Vec<(String, String)>>,
) -> WebResult<Response> {
    let search_term = FormFields::new(pairs).text("search_term").unwrap_or_default();
    let now = time::now();
    let results = query::search_artists(&state.db, &search_term, now).await?;

    let pending = flash.is_pending();
    render_page(
        SearchTemplate::new(flash.take(), "artists", search_term, results),
        pending,
    )
}

/// GET /artists/:id
pub async fn show_artist(
    State(state): State<AppState>,
    flash: Flash,
    Path(raw_id): Path<String>,
) -> WebResult<Response> {
    let id = parse_id(&raw_id, "artist")?;
    let now = time::now();
    let detail = query::artist_detail(&state.db, id, now).await?;

    let pending = flash.is_pending();
    render_page(ProfileTemplate::artist(flash.take(), &detail), pending)
}

/// GET /artists/create
pub async fn create_artist_form(flash: Flash) -> WebResult<Response> {
    let pending = flash.is_pending();
    render_page(
        ListingFormTemplate {
            notice: flash.take(),
            form: ListingForm::new_artist(),
        },
        pending,
    )
}

/// POST /artists/create
///
/// Renders the landing page with the outcome notice.
pub async fn create_artist(
    State(state): State<AppState>,
    flash: Flash,
    Form(pairs): Form<Vec<(String, String)>>,
) -> WebResult<Response> {
    let fields = FormFields::new(pairs);
    let name = fields.text("name").unwrap_or_default();

    let outcome = match artist_draft_from_form(&fields) {
        Ok(draft) => db::insert_artist(&state.db, &draft).await,
        Err(err) => Err(err),
    };
    let notice = notice_for(
        &outcome,
        |artist| format!("Artist {} was successfully listed!", artist.name),
        format!("An error occurred. Artist {} could not be listed.", name),
    );

    let pending = flash.is_pending();
    render_page(
        HomeTemplate {
            notice: Some(merge_notices(flash.take(), notice)),
        },
        pending,
    )
}

/// GET /artists/:id/edit
pub async fn edit_artist_form(
    State(state): State<AppState>,
    flash: Flash,
    Path(raw_id): Path<String>,
) -> WebResult<Response> {
    let id = parse_id(&raw_id, "artist")?;
    let artist = db::get_artist(&state.db, id).await?;

    let pending = flash.is_pending();
    render_page(
        ListingFormTemplate {
            notice: flash.take(),
            form: ListingForm::edit_artist(&artist),
        },
        pending,
    )
}

/// POST /artists/:id/edit
///
/// Overwrites every editable field, then redirects to the artist page.
pub async fn edit_artist(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> WebResult<Response> {
    let id = parse_id(&raw_id, "artist")?;
    let fields = FormFields::new(pairs);
    let name = fields.text("name").unwrap_or_default();

    let outcome = match artist_draft_from_form(&fields) {
        Ok(draft) => db::update_artist(&state.db, id, &draft).await,
        Err(err) => Err(err),
    };
    let notice = notice_for(
        &outcome,
        |artist| format!("Artist {} was successfully updated!", artist.name),
        format!("An error occurred. Artist {} could not be updated.", name),
    );

    Ok(redirect_with_notice(&format!("/artists/{}", id), &notice))
}

/// DELETE /artists/:id
///
/// Removes the artist and its shows. Answers `{"success": true}` whatever
/// the outcome; the notice tells the user what happened.
pub async fn delete_artist(State(state): State<AppState>, Path(raw_id): Path<String>) -> Response {
    let outcome = match raw_id.parse::<i64>() {
        Ok(id) => db::delete_artist(&state.db, id).await,
        Err(_) => Err(fyyur_common::Error::NotFound(format!("artist {}", raw_id))),
    };

    let notice = notice_for(
        &outcome,
        |deleted| format!("Artist {} was successfully deleted.", deleted.record.name),
        format!("An error occurred. Artist {} could not be deleted.", raw_id),
    );

    success_with_notice(&notice)
}

/// Build artist routes
pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(create_artist_form).post(create_artist))
        .route("/artists/:id", get(show_artist).delete(delete_artist))
        .route("/artists/:id/edit", get(edit_artist_form).post(edit_artist))
}
