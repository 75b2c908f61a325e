//! HTTP request handlers.

pub mod health;
pub mod links;
pub mod tokens;
pub mod users;
