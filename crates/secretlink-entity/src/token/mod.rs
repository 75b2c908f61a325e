//! Personal access token entities.

pub mod model;
pub mod scope;

pub use model::{ApiToken, NewApiToken};
pub use scope::Scope;
