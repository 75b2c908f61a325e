//! Authenticated encryption of link secrets.

pub mod codec;
pub mod context;
pub mod keyring;

pub use codec::{LinkCodec, NONCE_LEN, SealedSecret, TAG_LEN};
pub use context::LinkContext;
pub use keyring::{KEY_LEN, Keyring, MasterKey};
