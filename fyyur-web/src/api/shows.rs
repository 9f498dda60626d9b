//! Show listing and show creation

use axum::{
    extract::State,
    response::Response,
    routing::get,
    Form, Router,
};
use fyyur_common::{db, query};

use super::{merge_notices, notice_for, render_page};
use crate::error::WebResult;
use crate::flash::Flash;
use crate::forms::{new_show_from_form, FormFields};
use crate::templates::{HomeTemplate, ShowFormTemplate, ShowRow, ShowsTemplate};
use crate::AppState;

/// GET /shows
pub async fn list_shows(State(state): State<AppState>, flash: Flash) -> WebResult<Response> {
    let shows = query::show_listing(&state.db).await?;

    let pending = flash.is_pending();
    render_page(
        ShowsTemplate {
            notice: flash.take(),
            shows: shows.iter().map(ShowRow::from).collect(),
        },
        pending,
    )
}

/// GET /shows/create
pub async fn create_show_form(State(state): State<AppState>, flash: Flash) -> WebResult<Response> {
    let venues = db::list_venues(&state.db).await?;
    let artists = db::list_artists(&state.db).await?;

    let pending = flash.is_pending();
    render_page(
        ShowFormTemplate {
            notice: flash.take(),
            venues,
            artists,
        },
        pending,
    )
}

/// POST /shows/create
///
/// A show naming a missing venue or artist is refused and nothing is
/// written.
pub async fn create_show(
    State(state): State<AppState>,
    flash: Flash,
    Form(pairs): Form<Vec<(String, String)>>,
) -> WebResult<Response> {
    let fields = FormFields::new(pairs);

    let outcome = match new_show_from_form(&fields) {
        Ok(new_show) => db::insert_show(&state.db, &new_show).await,
        Err(err) => Err(err),
    };
    let notice = notice_for(
        &outcome,
        |_| "Show was successfully listed!".to_string(),
        "An error occurred. Show could not be listed.".to_string(),
    );

    let pending = flash.is_pending();
    render_page(
        HomeTemplate {
            notice: Some(merge_notices(flash.take(), notice)),
        },
        pending,
    )
}

/// Build show routes
pub fn show_routes() -> Router<AppState> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(create_show_form).post(create_show))
}
