//! HTTP handlers for fyyur-web
//!
//! Read handlers render pages and surface failures through `WebError`.
//! Write handlers always answer 2xx and report the outcome as a notice.

pub mod artists;
pub mod health;
pub mod pages;
pub mod shows;
pub mod venues;

pub use artists::artist_routes;
pub use health::health_routes;
pub use pages::page_routes;
pub use shows::show_routes;
pub use venues::venue_routes;

use askama::Template;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

use crate::error::{WebError, WebResult};
use crate::flash::{self, Flash};
use crate::templates::NotFoundTemplate;

/// Fallback for unmatched routes
pub async fn not_found(flash: Flash) -> Response {
    let pending = flash.is_pending();
    let page = NotFoundTemplate {
        notice: flash.take(),
    };

    match render_page(page, pending) {
        Ok(response) => (StatusCode::NOT_FOUND, response).into_response(),
        Err(err) => err.into_response(),
    }
}

/// Render a page, clearing the notice cookie once its notice is shown
pub(crate) fn render_page<T: Template>(page: T, flash_pending: bool) -> WebResult<Response> {
    let html = page.render()?;
    let mut response = Html(html).into_response();

    if flash_pending {
        response
            .headers_mut()
            .append(header::SET_COOKIE, flash::clear_cookie());
    }

    Ok(response)
}

/// Pick the notice for a write outcome, logging failures
///
/// Failures caused by the submission (bad input, missing or conflicting
/// records) carry their detail into the notice; store failures only reach
/// the log.
pub(crate) fn notice_for<T>(
    outcome: &fyyur_common::Result<T>,
    success: impl FnOnce(&T) -> String,
    failure: String,
) -> String {
    match outcome {
        Ok(value) => success(value),
        Err(err) if err.is_client_error() => {
            warn!("Rejected submission: {}", err);
            format!("{} {}", failure, err)
        }
        Err(err) => {
            warn!("Write failed: {}", err);
            failure
        }
    }
}

/// Show a notice still pending from an earlier redirect ahead of a new one
pub(crate) fn merge_notices(pending: Option<String>, notice: String) -> String {
    match pending {
        Some(earlier) => format!("{} {}", earlier, notice),
        None => notice,
    }
}

/// Redirect that carries a notice to the next page
pub(crate) fn redirect_with_notice(to: &str, notice: &str) -> Response {
    with_notice(Redirect::to(to), notice)
}

/// JSON `{"success": true}` carrying a notice to the next page
pub(crate) fn success_with_notice(notice: &str) -> Response {
    with_notice(Json(json!({ "success": true })), notice)
}

fn with_notice(response: impl IntoResponse, notice: &str) -> Response {
    let mut response = response.into_response();
    match HeaderValue::from_str(&flash::set_cookie(notice)) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(err) => warn!("Notice cookie not set: {}", err),
    }
    response
}

/// Parse a path id; anything but a positive integer is a missing record
pub(crate) fn parse_id(raw: &str, what: &str) -> WebResult<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(WebError::NotFound(format!("{} {}", what, raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12", "venue").unwrap(), 12);
        assert!(matches!(parse_id("0", "venue"), Err(WebError::NotFound(_))));
        assert!(matches!(parse_id("abc", "venue"), Err(WebError::NotFound(_))));
    }

    #[test]
    fn test_notice_for_outcomes() {
        let ok: fyyur_common::Result<&str> = Ok("The Spot");
        let notice = notice_for(&ok, |name| format!("Venue {} was listed", name), "failed".into());
        assert_eq!(notice, "Venue The Spot was listed");

        let invalid: fyyur_common::Result<&str> =
            Err(fyyur_common::Error::Validation("name is required".into()));
        let notice = notice_for(&invalid, |_| String::new(), "Venue could not be listed.".into());
        assert_eq!(
            notice,
            "Venue could not be listed. Validation failed: name is required"
        );

        let orphan: fyyur_common::Result<&str> = Err(fyyur_common::Error::ConstraintViolation(
            "artist 77 does not exist".into(),
        ));
        let notice = notice_for(&orphan, |_| String::new(), "Show could not be listed.".into());
        assert_eq!(
            notice,
            "Show could not be listed. Constraint violation: artist 77 does not exist"
        );

        let broken: fyyur_common::Result<&str> =
            Err(fyyur_common::Error::StoreUnavailable("pool closed".into()));
        let notice = notice_for(&broken, |_| String::new(), "Venue could not be listed.".into());
        assert_eq!(notice, "Venue could not be listed.");
    }

    #[test]
    fn test_merge_notices_keeps_pending_first() {
        assert_eq!(
            merge_notices(None, "Show was successfully listed!".into()),
            "Show was successfully listed!"
        );
        assert_eq!(
            merge_notices(
                Some("Venue The Spot was successfully updated!".into()),
                "Show was successfully listed!".into()
            ),
            "Venue The Spot was successfully updated! Show was successfully listed!"
        );
    }

    #[test]
    fn test_redirect_sets_notice_cookie() {
        let response = redirect_with_notice("/venues/1", "Venue The Spot was successfully updated!");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let cookie = response.headers().get(header::SET_COOKIE).unwrap();
        assert!(cookie.to_str().unwrap().starts_with("fyyur_flash="));
    }
}
