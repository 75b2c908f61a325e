//! Caller identity resolution and access checks.

pub mod identity;
pub mod chain;

pub use identity::{AuthMethod, Identity};
pub use chain::AuthResolver;
