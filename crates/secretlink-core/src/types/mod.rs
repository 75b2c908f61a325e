//! Core type definitions used across the SecretLink workspace.

pub mod id;
pub mod owner;
pub mod response;

pub use id::*;
pub use owner::LinkOwner;
pub use response::{ApiErrorBody, ApiErrorResponse};
