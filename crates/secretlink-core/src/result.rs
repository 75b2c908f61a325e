//! Convenience result type alias for SecretLink.

use crate::error::AppError;

/// A specialized `Result` type for SecretLink operations.
pub type AppResult<T> = Result<T, AppError>;
