//! Landing page

use axum::{response::Response, routing::get, Router};

use super::render_page;
use crate::error::WebResult;
use crate::flash::Flash;
use crate::templates::HomeTemplate;
use crate::AppState;

/// GET /
pub async fn home(flash: Flash) -> WebResult<Response> {
    let pending = flash.is_pending();
    render_page(HomeTemplate { notice: flash.take() }, pending)
}

/// Build landing page routes
pub fn page_routes() -> Router<AppState> {
    Router::new().route("/", get(home))
}
