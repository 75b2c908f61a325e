//! # secretlink-crypto
//!
//! Pure, non-blocking cryptographic building blocks:
//!
//! - [`aead`]: AES-256-GCM sealing of link secrets bound to their row
//! - [`token`]: link and API token generation plus lookup hashing
//! - [`digest`]: passphrase digests and constant-time comparison

pub mod aead;
pub mod digest;
pub mod error;
pub mod token;

pub use aead::{Keyring, LinkCodec, LinkContext, MasterKey, SealedSecret};
pub use error::CryptoError;
