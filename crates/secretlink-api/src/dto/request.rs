//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

/// Anonymous single-link creation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[validate(length(min = 1, message = "secret is required"))]
    pub secret: String,
}

/// `GET /links/redeem/{token}` query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedeemQuery {
    /// Client-side passphrase hash.
    pub pass: Option<String>,
}

/// `GET /links/status` query. Both bounds are optional; `since` is inclusive
/// and `until` is exclusive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusQuery {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

/// Account registration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"), length(max = 320))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Password change request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 1))]
    pub new_password: String,
}

/// Personal access token creation.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateTokenRequest {
    #[validate(length(max = 100, message = "Label must be at most 100 characters"))]
    pub label: Option<String>,
    /// Omitted means every scope.
    pub scopes: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_rejects_bad_email() {
        let req = SignupRequest {
            email: "not-an-email".to_string(),
            password: "pw".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_token_request_defaults() {
        let req: CreateTokenRequest = serde_json::from_str("{}").unwrap();
        assert!(req.label.is_none());
        assert!(req.scopes.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_status_query_parses_rfc3339() {
        let q: StatusQuery =
            serde_json::from_str(r#"{"since":"2026-01-01T00:00:00Z"}"#).unwrap();
        assert!(q.since.is_some());
        assert!(q.until.is_none());
    }
}
