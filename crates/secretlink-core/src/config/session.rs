//! Browser session configuration.

use serde::{Deserialize, Serialize};

/// Placeholder secret shipped in `config/default.toml`.
pub const PLACEHOLDER_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION_CHANGE_ME_IN_PRODUCTION";

/// Minimum accepted length of the session signing secret.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Session cookie and token settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Secret used to sign session tokens (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Session lifetime in seconds.
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
    /// Whether the cookie carries the `Secure` attribute.
    #[serde(default = "default_true")]
    pub secure_cookie: bool,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("jwt_secret", &"<redacted>")
            .field("cookie_name", &self.cookie_name)
            .field("ttl_seconds", &self.ttl_seconds)
            .field("secure_cookie", &self.secure_cookie)
            .finish()
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            cookie_name: default_cookie_name(),
            ttl_seconds: default_ttl(),
            secure_cookie: default_true(),
        }
    }
}

fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}

fn default_cookie_name() -> String {
    "sid".to_string()
}

fn default_ttl() -> u64 {
    604_800
}

fn default_true() -> bool {
    true
}
