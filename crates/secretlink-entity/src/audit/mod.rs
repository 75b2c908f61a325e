//! Audit domain entities.

pub mod model;

pub use model::{AuditEvent, AuditMeta, NewAuditEntry};
