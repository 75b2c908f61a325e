//! # secretlink-entity
//!
//! Domain entity models for SecretLink. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`.

pub mod audit;
pub mod link;
pub mod token;
pub mod user;
