//! Error types for fyyur-web
//!
//! Read paths surface failures as HTML error pages. Write paths never reach
//! this type: they turn failures into notices (see `api::notice_for`).

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::templates::{NotFoundTemplate, ServerErrorTemplate};

/// Page-level error
#[derive(Debug, Error)]
pub enum WebError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Template rendering failed (500)
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl From<fyyur_common::Error> for WebError {
    fn from(err: fyyur_common::Error) -> Self {
        match err {
            fyyur_common::Error::NotFound(what) => WebError::NotFound(what),
            other => WebError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, page) = match &self {
            WebError::NotFound(_) => (StatusCode::NOT_FOUND, NotFoundTemplate::default().render()),
            WebError::Internal(msg) => {
                error!("Request failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, ServerErrorTemplate::default().render())
            }
            WebError::Template(err) => {
                error!("Template rendering failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, ServerErrorTemplate::default().render())
            }
        };

        match page {
            Ok(html) => (status, Html(html)).into_response(),
            Err(_) => (status, status.canonical_reason().unwrap_or("Error")).into_response(),
        }
    }
}

/// Result type for page handlers
pub type WebResult<T> = Result<T, WebError>;
