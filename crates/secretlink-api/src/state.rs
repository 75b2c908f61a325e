//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use secretlink_auth::AuthResolver;
use secretlink_core::config::AppConfig;
use secretlink_database::DatabasePool;
use secretlink_service::{LinkService, TokenService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db: DatabasePool,

    // ── Auth ─────────────────────────────────────────────────
    /// Session-then-bearer caller resolution
    pub resolver: Arc<AuthResolver>,

    // ── Services ─────────────────────────────────────────────
    /// Link lifecycle engine
    pub link_service: Arc<LinkService>,
    /// Personal access tokens
    pub token_service: Arc<TokenService>,
    /// Accounts and sessions
    pub user_service: Arc<UserService>,
}
