//! Custom Axum extractors.

pub mod caller;
pub mod client;
pub mod json;
pub mod query;

pub use caller::Caller;
pub use client::ClientMeta;
pub use json::{JsonBody, ValidJson};
pub use query::QueryParams;
