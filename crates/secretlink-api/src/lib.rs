//! # secretlink-api
//!
//! HTTP API layer for SecretLink built on Axum.
//!
//! Provides the link, account, and token endpoints, request logging with
//! token redaction, CORS, extractors for caller identity and client
//! metadata, DTOs, and error mapping.

pub mod app;
pub mod cookie;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use error::ApiError;
pub use state::AppState;
