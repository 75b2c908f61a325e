//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;

use secretlink_core::types::{ApiTokenId, UserId};
use secretlink_entity::token::ApiToken;
use secretlink_entity::user::User;
use secretlink_service::{CreatedToken, LinkCreateResult};

/// `POST /links` body.
#[derive(Debug, Clone, Serialize)]
pub struct CreateLinkResponse {
    pub result: LinkCreateResult,
}

/// `POST /links/bulk` body.
#[derive(Debug, Clone, Serialize)]
pub struct BulkCreateResponse {
    pub results: Vec<LinkCreateResult>,
}

/// Public account view.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub password_changed_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
            password_changed_at: user.password_changed_at,
        }
    }
}

/// A personal access token without its hash.
#[derive(Debug, Clone, Serialize)]
pub struct PatResponse {
    pub id: ApiTokenId,
    pub label: Option<String>,
    pub scopes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl From<ApiToken> for PatResponse {
    fn from(token: ApiToken) -> Self {
        Self {
            id: token.id,
            label: token.label,
            scopes: token.scopes,
            created_at: token.created_at,
            revoked_at: token.revoked_at,
        }
    }
}

/// `POST /users/tokens` body; the only response that carries the raw token.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedTokenResponse {
    pub token: String,
    pub token_preview: String,
    pub pat: PatResponse,
}

impl From<CreatedToken> for CreatedTokenResponse {
    fn from(created: CreatedToken) -> Self {
        Self {
            token: created.token,
            token_preview: created.token_preview,
            pat: created.pat.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}
