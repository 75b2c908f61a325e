//! Personal access token lifecycle.

pub mod service;

pub use service::{CreatedToken, TokenService};
