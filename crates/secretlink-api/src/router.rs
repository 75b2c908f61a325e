//! Route definitions for the SecretLink HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// The request timeout also bounds how long a redemption can hold its row
/// lock: a timed-out handler future is dropped, rolling back its
/// transaction.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;
    let cors = middleware::cors::build_cors_layer(&server.cors);
    let timeout = Duration::from_secs(server.request_timeout_seconds);
    let body_limit = server.body_limit_bytes;

    Router::new()
        .merge(link_routes())
        .merge(user_routes())
        .merge(token_routes())
        .route("/health", get(handlers::health::health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http().make_span_with(middleware::logging::make_request_span))
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Link lifecycle endpoints
fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(handlers::links::create_link))
        .route("/links/bulk", post(handlers::links::create_links))
        .route("/links/status", get(handlers::links::link_status))
        .route("/links/redeem/{token}", get(handlers::links::redeem_link))
        .route("/links/{token}", delete(handlers::links::delete_link))
}

/// Account endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/signup", post(handlers::users::signup))
        .route("/users/login", post(handlers::users::login))
        .route("/users/logout", post(handlers::users::logout))
        .route(
            "/users/me",
            get(handlers::users::me).delete(handlers::users::delete_me),
        )
        .route("/users/me/purge", delete(handlers::users::purge_me))
        .route("/users/password", post(handlers::users::change_password))
}

/// Personal access token endpoints
fn token_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/tokens",
            get(handlers::tokens::list_tokens).post(handlers::tokens::create_token),
        )
        .route("/users/tokens/{id}", delete(handlers::tokens::revoke_token))
}
