//! Session cookie formatting.

use axum::http::HeaderValue;
use axum_extra::extract::cookie::{Cookie, SameSite};

use secretlink_core::config::session::SessionConfig;
use secretlink_core::error::{AppError, ErrorKind};

/// `Set-Cookie` value carrying a freshly issued session.
pub fn issue(config: &SessionConfig, token: &str) -> Result<HeaderValue, AppError> {
    render(config, token, config.ttl_seconds)
}

/// `Set-Cookie` value that removes the session from the browser.
pub fn clear(config: &SessionConfig) -> Result<HeaderValue, AppError> {
    render(config, "", 0)
}

fn render(config: &SessionConfig, value: &str, max_age: u64) -> Result<HeaderValue, AppError> {
    let cookie = Cookie::build((config.cookie_name.as_str(), value))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookie)
        .same_site(SameSite::Lax)
        .build();
    HeaderValue::from_str(&format!("{cookie}; Max-Age={max_age}"))
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Invalid session cookie", e))
}
