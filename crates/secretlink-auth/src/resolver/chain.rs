//! Two-path credential resolution.

use tracing::debug;

use secretlink_core::result::AppResult;
use secretlink_crypto::token::hash_token;
use secretlink_database::repositories::ApiTokenRepository;

use crate::jwt::SessionDecoder;

use super::identity::Identity;

/// Resolves a caller from a session cookie, then a bearer token.
///
/// The first credential that resolves wins. A credential that fails to
/// resolve is skipped, so a caller with neither is [`Identity::Anonymous`].
#[derive(Debug, Clone)]
pub struct AuthResolver {
    sessions: SessionDecoder,
    tokens: ApiTokenRepository,
}

impl AuthResolver {
    pub fn new(sessions: SessionDecoder, tokens: ApiTokenRepository) -> Self {
        Self { sessions, tokens }
    }

    /// Resolve the presented credentials.
    ///
    /// Only store failures are returned as errors.
    pub async fn resolve(
        &self,
        session_cookie: Option<&str>,
        bearer: Option<&str>,
    ) -> AppResult<Identity> {
        if let Some(cookie) = session_cookie.filter(|c| !c.is_empty()) {
            match self.sessions.decode(cookie) {
                Ok(claims) => {
                    return Ok(Identity::Session {
                        user_id: claims.user_id(),
                    });
                }
                Err(e) => debug!(error = %e, "Session validation failed, trying bearer token"),
            }
        }

        if let Some(raw) = bearer.map(str::trim).filter(|t| !t.is_empty()) {
            match self.tokens.find_active_by_hash(&hash_token(raw)).await? {
                Some(token) => {
                    let scopes = token.granted_scopes();
                    return Ok(Identity::Pat {
                        user_id: token.user_id,
                        token_id: token.id,
                        scopes,
                    });
                }
                None => debug!("Bearer token is unknown or revoked"),
            }
        }

        Ok(Identity::Anonymous)
    }
}
