//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod crypto;
pub mod database;
pub mod links;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::auth::AuthConfig;
use self::crypto::CryptoConfig;
use self::database::DatabaseConfig;
use self::links::LinksConfig;
use self::logging::LoggingConfig;
use self::session::{MIN_JWT_SECRET_LEN, PLACEHOLDER_JWT_SECRET, SessionConfig};

use crate::error::AppError;

/// Deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Returns `true` in production.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment environment.
    #[serde(default)]
    pub environment: Environment,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Master key settings.
    #[serde(default)]
    pub crypto: CryptoConfig,
    /// Browser session settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Account password policy.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Link lifecycle limits.
    #[serde(default)]
    pub links: LinksConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `SECRETLINK__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SECRETLINK")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allowed_origins")
                    .with_list_parse_key("server.cors.allowed_methods")
                    .with_list_parse_key("server.cors.allowed_headers")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express.
    ///
    /// Key material is validated separately when the keyring is built.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.session.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(AppError::configuration(format!(
                "session.jwt_secret must be at least {MIN_JWT_SECRET_LEN} bytes"
            )));
        }
        if self.environment.is_production() && self.session.jwt_secret == PLACEHOLDER_JWT_SECRET {
            return Err(AppError::configuration(
                "session.jwt_secret must be changed in production",
            ));
        }
        if self.links.bulk_max_rows == 0 {
            return Err(AppError::configuration("links.bulk_max_rows must be positive"));
        }
        if self.links.status_page_size <= 0 {
            return Err(AppError::configuration(
                "links.status_page_size must be positive",
            ));
        }
        if self.auth.password_min_length > self.auth.password_max_length {
            return Err(AppError::configuration(
                "auth.password_min_length exceeds auth.password_max_length",
            ));
        }
        if self.crypto.keys.is_empty() {
            return Err(AppError::configuration("crypto.keys must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn sample() -> AppConfig {
        AppConfig {
            environment: Environment::Development,
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgres://localhost/secretlink".to_string(),
                max_connections: 5,
                min_connections: 1,
                connect_timeout_seconds: 5,
                idle_timeout_seconds: 60,
                lock_timeout_ms: 5_000,
                statement_timeout_ms: 10_000,
            },
            crypto: CryptoConfig {
                active_key_version: 1,
                keys: HashMap::from([("1".to_string(), "00".repeat(32))]),
            },
            session: SessionConfig::default(),
            auth: AuthConfig::default(),
            links: LinksConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_placeholder_secret_allowed_in_development() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_placeholder_secret_refused_in_production() {
        let mut config = sample();
        config.environment = Environment::Production;
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::Configuration);
    }

    #[test]
    fn test_short_secret_refused() {
        let mut config = sample();
        config.session.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_keyring_refused() {
        let mut config = sample();
        config.crypto.keys.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_environment_deserializes_lowercase() {
        let env: Environment = serde_json::from_str("\"production\"").unwrap();
        assert!(env.is_production());
    }
}
