//! Account signup, login, and password management.

pub mod service;

pub use service::{PurgeSummary, SessionGrant, UserService};
