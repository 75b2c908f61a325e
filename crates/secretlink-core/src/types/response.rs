//! Error envelope returned by every failing endpoint.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// `{ "error": { ... } }` wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// The error body.
    pub error: ApiErrorBody,
}

/// Inner error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiErrorResponse {
    /// Build the client-facing envelope for an error.
    ///
    /// Server-side failures are reported with an opaque message; the real
    /// cause stays in the logs.
    pub fn from_error(err: &AppError) -> Self {
        let message = if err.kind.is_server_error() {
            "An unexpected error occurred".to_string()
        } else {
            err.message.clone()
        };

        Self {
            error: ApiErrorBody {
                code: err.code().to_string(),
                message,
                details: if err.kind.is_server_error() {
                    None
                } else {
                    err.details.clone()
                },
            },
        }
    }
}
