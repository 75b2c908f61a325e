//! Personal access token entity model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use secretlink_core::types::{ApiTokenId, UserId};

use super::scope::Scope;

/// A stored personal access token. Only the hash of the raw token is kept.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApiToken {
    pub id: ApiTokenId,
    pub user_id: UserId,
    /// SHA-256 hex digest of the raw token.
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub label: Option<String>,
    /// Scope strings as stored in the `text[]` column.
    pub scopes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl ApiToken {
    /// Whether this token has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Stored scopes that this build recognises. Unknown strings grant nothing.
    pub fn granted_scopes(&self) -> Vec<Scope> {
        let mut scopes: Vec<Scope> = self
            .scopes
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        scopes.sort();
        scopes.dedup();
        scopes
    }
}

/// Data required to create a new token.
#[derive(Debug, Clone)]
pub struct NewApiToken {
    pub user_id: UserId,
    pub token_hash: String,
    pub label: Option<String>,
    pub scopes: Vec<Scope>,
}
