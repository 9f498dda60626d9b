//! Transient user-facing notices ("flash" messages)
//!
//! A notice set before a redirect travels in a short-lived cookie and is
//! shown, then cleared, by the next page that renders it.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderValue},
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::convert::Infallible;

/// Cookie carrying a pending notice
pub const FLASH_COOKIE: &str = "fyyur_flash";

/// Seconds a pending notice survives if never displayed
const FLASH_MAX_AGE_SECS: u32 = 60;

/// Pending notice read from the request cookies
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flash {
    message: Option<String>,
}

impl Flash {
    /// The pending notice, if any
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Consume the notice for display
    pub fn take(self) -> Option<String> {
        self.message
    }

    /// True when the request carried a notice cookie that must be cleared
    pub fn is_pending(&self) -> bool {
        self.message.is_some()
    }

    fn from_cookie_header(value: &str) -> Self {
        let message = value
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == FLASH_COOKIE)
            .and_then(|(_, encoded)| decode(encoded));

        Self { message }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let flash = parts
            .headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(Flash::from_cookie_header)
            .find(Flash::is_pending)
            .unwrap_or_default();

        Ok(flash)
    }
}

/// `Set-Cookie` value that stores `message` for the next page
pub fn set_cookie(message: &str) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        FLASH_COOKIE,
        URL_SAFE_NO_PAD.encode(message.as_bytes()),
        FLASH_MAX_AGE_SECS
    )
}

/// `Set-Cookie` value that discards a displayed notice
pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("fyyur_flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

fn decode(encoded: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(encoded).ok()?;
    let message = String::from_utf8(bytes).ok()?;
    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie_value(set_cookie: &str) -> &str {
        set_cookie.split(';').next().unwrap()
    }

    #[test]
    fn test_set_cookie_then_read_back() {
        let header = set_cookie("Venue The Spot was successfully updated!");
        let flash = Flash::from_cookie_header(cookie_value(&header));
        assert_eq!(flash.message(), Some("Venue The Spot was successfully updated!"));
    }

    #[test]
    fn test_notice_found_among_other_cookies() {
        let header = set_cookie("Show was successfully listed!");
        let cookies = format!("theme=dark; {}; lang=en", cookie_value(&header));
        let flash = Flash::from_cookie_header(&cookies);
        assert_eq!(flash.take().as_deref(), Some("Show was successfully listed!"));
    }

    #[test]
    fn test_cleared_or_garbled_cookie_is_ignored() {
        assert!(!Flash::from_cookie_header("fyyur_flash=").is_pending());
        assert!(!Flash::from_cookie_header("fyyur_flash=!!not-base64!!").is_pending());
        assert!(!Flash::from_cookie_header("other=value").is_pending());
    }

    #[test]
    fn test_set_cookie_has_no_separator_characters() {
        let header = set_cookie("a; b, c = d");
        let value = cookie_value(&header);
        assert!(!value.contains(' '));
        assert!(!value.contains(','));
    }
}
