//! Shared test helpers for integration tests.
//!
//! Tests run against the PostgreSQL database named by
//! `SECRETLINK_TEST_DATABASE_URL` and skip themselves when it is unset.
//! Every test works with freshly registered accounts, so tests can share
//! one database and run in parallel.

#![allow(dead_code)]

use std::collections::HashMap;

use axum::Router;
use axum::body::Body;
use http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use http::{HeaderMap, Request, StatusCode};
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use secretlink_core::config::AppConfig;
use secretlink_core::config::app::ServerConfig;
use secretlink_core::config::auth::AuthConfig;
use secretlink_core::config::crypto::CryptoConfig;
use secretlink_core::config::database::DatabaseConfig;
use secretlink_core::config::links::LinksConfig;
use secretlink_core::config::logging::LoggingConfig;
use secretlink_core::config::session::SessionConfig;
use secretlink_core::config::Environment;
use secretlink_crypto::Keyring;
use secretlink_database::DatabasePool;

/// Password that satisfies the default strength policy.
pub const PASSWORD: &str = "correct-horse-battery-staple-42";

const TEST_KEY: &str = "3a7c0e15b2d94f68a1c5e7092b4d6f8103a5c7e9f1b3d5a7092c4e6f8a0b2d4c";

/// Credential attached to a test request.
#[derive(Debug, Clone, Copy)]
pub enum Auth<'a> {
    None,
    /// Raw session cookie value.
    Session(&'a str),
    /// Raw personal access token.
    Bearer(&'a str),
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Application config
    pub config: AppConfig,
}

/// A registered account and its session.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub email: String,
    pub session: String,
}

impl TestApp {
    /// Create a new test application, or `None` when no test database is configured.
    pub async fn new() -> Option<Self> {
        let Ok(url) = std::env::var("SECRETLINK_TEST_DATABASE_URL") else {
            eprintln!("SECRETLINK_TEST_DATABASE_URL is not set; skipping");
            return None;
        };

        let config = test_config(url);
        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        secretlink_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let keyring = Keyring::from_config(&config.crypto).expect("Failed to build keyring");
        let db_pool = db.pool().clone();
        let state = secretlink_api::build_state(config.clone(), db, keyring);

        Some(Self {
            router: secretlink_api::build_app(state),
            db_pool,
            config,
        })
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        auth: Auth<'_>,
    ) -> TestResponse {
        send(self.router.clone(), build_request(method, path, body, auth, &self.config)).await
    }

    /// Build a request without sending it, for concurrent dispatch through [`send`].
    pub fn build(&self, method: &str, path: &str, body: Option<Value>, auth: Auth<'_>) -> Request<Body> {
        build_request(method, path, body, auth, &self.config)
    }

    /// Register a fresh account and return its session cookie value.
    pub async fn signup(&self) -> TestUser {
        let email = format!("user-{}@example.com", Uuid::new_v4());
        let response = self
            .request(
                "POST",
                "/users/signup",
                Some(json!({ "email": email, "password": PASSWORD })),
                Auth::None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "Signup failed: {:?}", response.body);

        let session = response
            .session_cookie(&self.config.session.cookie_name)
            .expect("Signup did not set a session cookie");
        TestUser { email, session }
    }

    /// Issue a personal access token with `scopes` and return the raw token.
    pub async fn create_pat(&self, user: &TestUser, scopes: &[&str]) -> String {
        let response = self
            .request(
                "POST",
                "/users/tokens",
                Some(json!({ "label": "test", "scopes": scopes })),
                Auth::Session(&user.session),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "PAT creation failed: {:?}", response.body);
        response.body["token"]
            .as_str()
            .expect("No token in response")
            .to_string()
    }

    /// Bulk-create links as `user` and return the per-row results.
    pub async fn create_bulk(&self, user: &TestUser, rows: Value) -> Vec<Value> {
        let response = self
            .request("POST", "/links/bulk", Some(rows), Auth::Session(&user.session))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "Bulk create failed: {:?}", response.body);
        response.body["results"]
            .as_array()
            .expect("No results in response")
            .clone()
    }

    /// Create one anonymous link and return its token.
    pub async fn create_anonymous(&self, secret: &str) -> String {
        let response = self
            .request("POST", "/links", Some(json!({ "secret": secret })), Auth::None)
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "Create failed: {:?}", response.body);
        response.body["result"]["link_token"]
            .as_str()
            .expect("No link_token in response")
            .to_string()
    }

    /// Stored ciphertext length for a token.
    pub async fn cipher_len(&self, token: &str) -> i32 {
        sqlx::query_scalar::<_, i32>("SELECT length(cipher_text) FROM links WHERE link_token = $1")
            .bind(token)
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to read link")
    }

    /// Move a link's expiry into the past.
    pub async fn expire(&self, token: &str) {
        sqlx::query("UPDATE links SET expires_at = NOW() - INTERVAL '1 second' WHERE link_token = $1")
            .bind(token)
            .execute(&self.db_pool)
            .await
            .expect("Failed to expire link");
    }

    /// Whether a link row still exists for a token.
    pub async fn link_exists(&self, token: &str) -> bool {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM links WHERE link_token = $1)")
            .bind(token)
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to read link")
    }

    /// Links `user` holds for `item_id` that could still be redeemed.
    pub async fn live_links(&self, user: &TestUser, item_id: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM links l JOIN users u ON u.id = l.owner_user_id \
             WHERE u.email = $1 AND l.item_id = $2 \
             AND l.used_at IS NULL AND l.deleted_at IS NULL \
             AND (l.expires_at IS NULL OR l.expires_at > NOW())",
        )
        .bind(&user.email)
        .bind(item_id)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to count links")
    }

    /// Rows in `table` whose `column` holds `user_id`.
    pub async fn rows_for_user_id(&self, user_id: &str, table: &str, column: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM {table} WHERE {column} = $1::uuid"
        ))
        .bind(user_id)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to count rows")
    }

    /// Account id of `user`, as reported by `/users/me`.
    pub async fn user_id(&self, user: &TestUser) -> String {
        let me = self.request("GET", "/users/me", None, Auth::Session(&user.session)).await;
        assert_eq!(me.status, StatusCode::OK, "Failed to read account: {:?}", me.body);
        me.body["id"].as_str().expect("No id in response").to_string()
    }

    /// Audit event types recorded for a token's link, oldest first.
    pub async fn audit_events(&self, token: &str) -> Vec<String> {
        sqlx::query_scalar::<_, String>(
            "SELECT a.event_type FROM audits a JOIN links l ON l.id = a.link_id \
             WHERE l.link_token = $1 ORDER BY a.created_at, a.id",
        )
        .bind(token)
        .fetch_all(&self.db_pool)
        .await
        .expect("Failed to read audits")
    }
}

fn build_request(
    method: &str,
    path: &str,
    body: Option<Value>,
    auth: Auth<'_>,
    config: &AppConfig,
) -> Request<Body> {
    let body_str = body
        .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
        .unwrap_or_default();

    let mut req = Request::builder()
        .method(method)
        .uri(path)
        .header(CONTENT_TYPE, "application/json");

    match auth {
        Auth::None => {}
        Auth::Session(session) => {
            req = req.header(COOKIE, format!("{}={session}", config.session.cookie_name));
        }
        Auth::Bearer(token) => {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }
    }

    req.body(Body::from(body_str)).expect("Failed to build request")
}

/// Send a prepared request through a router clone.
pub async fn send(router: Router, req: Request<Body>) -> TestResponse {
    let response = router.oneshot(req).await.expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("Failed to read body");

    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    TestResponse { status, headers, body }
}

fn test_config(url: String) -> AppConfig {
    AppConfig {
        environment: Environment::Development,
        server: ServerConfig {
            public_base_url: "https://secretlink.test".to_string(),
            ..ServerConfig::default()
        },
        database: DatabaseConfig {
            url,
            max_connections: 16,
            min_connections: 1,
            connect_timeout_seconds: 10,
            idle_timeout_seconds: 60,
            lock_timeout_ms: 5_000,
            statement_timeout_ms: 10_000,
        },
        crypto: CryptoConfig {
            active_key_version: 1,
            keys: HashMap::from([("1".to_string(), TEST_KEY.to_string())]),
        },
        session: SessionConfig {
            jwt_secret: "integration-test-session-secret-0123456789".to_string(),
            secure_cookie: false,
            ..SessionConfig::default()
        },
        auth: AuthConfig::default(),
        links: LinksConfig::default(),
        logging: LoggingConfig::default(),
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// `error.code` of an error envelope.
    pub fn error_code(&self) -> &str {
        self.body["error"]["code"].as_str().unwrap_or("")
    }

    /// Value of the named cookie from `Set-Cookie`, if set.
    pub fn session_cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .find_map(|pair| pair.strip_prefix(&prefix))
            .map(str::to_string)
    }
}
