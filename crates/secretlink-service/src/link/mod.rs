//! Link lifecycle engine.

pub mod model;
pub mod service;
pub mod validation;

pub use model::{BulkLinkRow, CreateStatus, LinkCreateResult, RedeemedSecret};
pub use service::LinkService;
