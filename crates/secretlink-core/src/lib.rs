//! # secretlink-core
//!
//! Core crate for SecretLink. Contains configuration schemas, typed
//! identifiers, link ownership, API envelope types, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other SecretLink crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
