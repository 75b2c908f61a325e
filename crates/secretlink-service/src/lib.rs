//! # secretlink-service
//!
//! Business logic service layer for SecretLink. [`LinkService`] is the link
//! lifecycle engine; [`TokenService`] and [`UserService`] manage personal
//! access tokens and accounts.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod link;
pub mod token;
pub mod user;

pub use context::RequestContext;
pub use link::{BulkLinkRow, CreateStatus, LinkCreateResult, LinkService, RedeemedSecret};
pub use token::{CreatedToken, TokenService};
pub use user::{PurgeSummary, SessionGrant, UserService};
