//! Request/response logging middleware.
//!
//! Link tokens in paths are credentials, so they are redacted before a path
//! reaches any log line or span.

use std::borrow::Cow;
use std::time::Instant;

use axum::extract::Request;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{Span, info, info_span};

const REDACTED: &str = ":token";

/// Logs request method, redacted path, status, and duration.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = redact_path(&method, request.uri().path()).into_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "HTTP request"
    );

    response
}

/// Span for `TraceLayer` that never records the raw URI.
pub fn make_request_span(request: &Request) -> Span {
    info_span!(
        "http_request",
        method = %request.method(),
        path = %redact_path(request.method(), request.uri().path()),
    )
}

/// Replace the token segment of link routes.
pub fn redact_path<'a>(method: &Method, path: &'a str) -> Cow<'a, str> {
    if path.starts_with("/links/redeem/") {
        return Cow::Owned(format!("/links/redeem/{REDACTED}"));
    }
    if *method == Method::DELETE {
        if let Some(rest) = path.strip_prefix("/links/") {
            if !rest.is_empty() && !rest.contains('/') {
                return Cow::Owned(format!("/links/{REDACTED}"));
            }
        }
    }
    Cow::Borrowed(path)
}
