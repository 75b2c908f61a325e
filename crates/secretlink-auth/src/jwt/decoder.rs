//! Session token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use secretlink_core::config::session::SessionConfig;
use secretlink_core::error::AppError;

use super::claims::SessionClaims;

/// Validates session tokens.
#[derive(Clone)]
pub struct SessionDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for SessionDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl SessionDecoder {
    /// Creates a new decoder from session configuration.
    pub fn new(config: &SessionConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a session token string.
    pub fn decode(&self, token: &str) -> Result<SessionClaims, AppError> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Session has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("Invalid session signature")
                }
                _ => AppError::unauthorized(format!("Session validation failed: {e}")),
            })?;

        Ok(token_data.claims)
    }
}
