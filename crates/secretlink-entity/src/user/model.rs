//! User entity model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use secretlink_core::types::UserId;

/// A registered account that can own links and tokens.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Login email, stored lowercased.
    pub email: String,
    /// Argon2id password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// Last time the password was changed.
    pub password_changed_at: Option<DateTime<Utc>>,
}
