//! # secretlink-database
//!
//! PostgreSQL connection management, migrations, and concrete repository
//! implementations for all SecretLink entities.
//!
//! Repository methods that take a `&mut PgConnection` run inside a
//! transaction owned by the caller; methods without one use the pool.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::{DatabasePool, Transaction};
