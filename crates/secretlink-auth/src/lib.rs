//! # secretlink-auth
//!
//! Authentication and caller resolution for SecretLink.
//!
//! ## Modules
//!
//! - `jwt`: signed, time-boxed browser session tokens
//! - `password`: Argon2id password hashing and policy enforcement
//! - `resolver`: session-then-bearer identity resolution and access checks

pub mod jwt;
pub mod password;
pub mod resolver;

pub use jwt::{SessionClaims, SessionDecoder, SessionEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use resolver::{AuthMethod, AuthResolver, Identity};
