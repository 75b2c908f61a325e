//! Personal access token repository.

use sqlx::PgPool;

use secretlink_core::error::{AppError, ErrorKind};
use secretlink_core::result::AppResult;
use secretlink_core::types::{ApiTokenId, UserId};
use secretlink_entity::token::{ApiToken, NewApiToken};

/// Repository for personal access tokens.
#[derive(Debug, Clone)]
pub struct ApiTokenRepository {
    pool: PgPool,
}

impl ApiTokenRepository {
    /// Create a new token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a new token hash.
    pub async fn create(&self, data: &NewApiToken) -> AppResult<ApiToken> {
        let scopes: Vec<String> = data.scopes.iter().map(|s| s.as_str().to_string()).collect();
        sqlx::query_as::<_, ApiToken>(
            "INSERT INTO api_tokens (user_id, token_hash, label, scopes) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.token_hash)
        .bind(&data.label)
        .bind(scopes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create token", e))
    }

    /// Find an unrevoked token by the exact hash of its raw value.
    pub async fn find_active_by_hash(&self, token_hash: &str) -> AppResult<Option<ApiToken>> {
        sqlx::query_as::<_, ApiToken>(
            "SELECT * FROM api_tokens WHERE token_hash = $1 AND revoked_at IS NULL",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find token", e))
    }

    /// List a user's tokens, newest first.
    pub async fn list_by_user(&self, user_id: UserId) -> AppResult<Vec<ApiToken>> {
        sqlx::query_as::<_, ApiToken>(
            "SELECT * FROM api_tokens WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tokens", e))
    }

    /// Revoke a token owned by `user_id`. Revoking twice keeps the first timestamp.
    pub async fn revoke(&self, id: ApiTokenId, user_id: UserId) -> AppResult<ApiToken> {
        sqlx::query_as::<_, ApiToken>(
            "UPDATE api_tokens SET revoked_at = COALESCE(revoked_at, NOW()) \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to revoke token", e))?
        .ok_or_else(|| AppError::not_found("Token not found"))
    }
}
