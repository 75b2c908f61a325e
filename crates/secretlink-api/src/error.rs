//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use secretlink_core::error::AppError;
use secretlink_core::types::ApiErrorResponse;

/// HTTP-facing wrapper around [`AppError`].
///
/// Handlers return `Result<_, ApiError>` and convert domain errors with `?`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status =
            StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if err.kind.is_server_error() {
            let source = err.source.as_ref().map(ToString::to_string);
            error!(
                kind = %err.kind,
                error = %err.message,
                source = source.as_deref().unwrap_or(""),
                "Request failed"
            );
        } else {
            warn!(code = err.code(), message = %err.message, "Request rejected");
        }

        (status, Json(ApiErrorResponse::from_error(&err))).into_response()
    }
}

/// Handler result type.
pub type ApiResult<T> = Result<T, ApiError>;
