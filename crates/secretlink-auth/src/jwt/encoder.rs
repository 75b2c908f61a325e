//! Session token creation.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use secretlink_core::config::session::SessionConfig;
use secretlink_core::error::AppError;
use secretlink_core::types::UserId;

use super::claims::SessionClaims;

/// Creates signed HS256 session tokens.
#[derive(Clone)]
pub struct SessionEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Session lifetime in seconds.
    ttl_seconds: i64,
}

impl std::fmt::Debug for SessionEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEncoder")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl SessionEncoder {
    /// Creates a new encoder from session configuration.
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_seconds: i64::try_from(config.ttl_seconds).unwrap_or(i64::MAX / 2),
        }
    }

    /// Issues a session token for `user_id`, returning it with its expiry.
    pub fn issue(&self, user_id: UserId) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::seconds(self.ttl_seconds);
        self.issue_with_expiry(user_id, now, exp)
    }

    pub(crate) fn issue_with_expiry(
        &self,
        user_id: UserId,
        issued_at: DateTime<Utc>,
        exp: DateTime<Utc>,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let claims = SessionClaims {
            sub: user_id,
            iat: issued_at.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))?;

        Ok((token, exp))
    }
}
