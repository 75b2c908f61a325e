//! Issue, list, and revoke personal access tokens.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use secretlink_core::result::AppResult;
use secretlink_core::types::{ApiTokenId, UserId};
use secretlink_crypto::token::{hash_token, new_api_token, token_preview};
use secretlink_database::repositories::ApiTokenRepository;
use secretlink_entity::token::{ApiToken, NewApiToken, Scope};

/// Characters of the raw token echoed back as a preview.
const PREVIEW_LEN: usize = 6;

/// A freshly issued token. `token` is never retrievable again.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedToken {
    pub token: String,
    pub token_preview: String,
    pub pat: ApiToken,
}

/// Manages a user's personal access tokens.
#[derive(Debug, Clone)]
pub struct TokenService {
    tokens: Arc<ApiTokenRepository>,
}

impl TokenService {
    /// Creates a new token service.
    pub fn new(tokens: Arc<ApiTokenRepository>) -> Self {
        Self { tokens }
    }

    /// Issue a token for `user_id`.
    ///
    /// A blank label is stored as none. Omitted scopes grant every scope;
    /// unknown scope strings are rejected.
    pub async fn create(
        &self,
        user_id: UserId,
        label: Option<&str>,
        scopes: Option<&[String]>,
    ) -> AppResult<CreatedToken> {
        let scopes = match scopes {
            Some(values) => Scope::parse_list(values)?,
            None => Scope::ALL.to_vec(),
        };
        let label = label
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);

        let token = new_api_token()?;
        let pat = self
            .tokens
            .create(&NewApiToken {
                user_id,
                token_hash: hash_token(&token),
                label,
                scopes,
            })
            .await?;

        info!(user_id = %user_id, token_id = %pat.id, scopes = ?pat.scopes, "API token created");

        Ok(CreatedToken {
            token_preview: token_preview(&token, PREVIEW_LEN),
            token,
            pat,
        })
    }

    /// The user's tokens, newest first.
    pub async fn list(&self, user_id: UserId) -> AppResult<Vec<ApiToken>> {
        self.tokens.list_by_user(user_id).await
    }

    /// Revoke one of the user's tokens.
    pub async fn revoke(&self, user_id: UserId, id: ApiTokenId) -> AppResult<ApiToken> {
        let pat = self.tokens.revoke(id, user_id).await?;
        info!(user_id = %user_id, token_id = %id, "API token revoked");
        Ok(pat)
    }
}
