//! `Caller` extractor: resolves the session cookie or bearer token.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};

use secretlink_auth::{AuthMethod, Identity};
use secretlink_core::types::UserId;
use secretlink_entity::token::Scope;

use crate::error::ApiError;
use crate::state::AppState;

/// Session or personal access token.
pub const ANY_METHOD: &[AuthMethod] = &[AuthMethod::Session, AuthMethod::Pat];

/// Browser session only.
pub const SESSION_ONLY: &[AuthMethod] = &[AuthMethod::Session];

/// The resolved identity of the caller; anonymous when no credential resolves.
#[derive(Debug, Clone)]
pub struct Caller(pub Identity);

impl Caller {
    /// Require one of `methods` and every scope in `scopes`.
    pub fn require(&self, methods: &[AuthMethod], scopes: &[Scope]) -> Result<UserId, ApiError> {
        Ok(self.0.require(methods, scopes)?)
    }
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session = jar
            .get(&state.config.session.cookie_name)
            .map(|c| c.value().to_string());

        let bearer = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .map(|auth| auth.token().to_string());

        let identity = state
            .resolver
            .resolve(session.as_deref(), bearer.as_deref())
            .await?;
        Ok(Self(identity))
    }
}
