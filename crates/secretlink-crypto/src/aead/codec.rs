//! AES-256-GCM sealing of link secrets.
//!
//! Every call to [`LinkCodec::seal`] draws a fresh random 96-bit nonce from
//! the system CSPRNG. Nonce reuse under one key would be catastrophic for
//! GCM security.

use std::sync::Arc;

use ring::aead::{AES_256_GCM, Aad, LessSafeKey, Nonce, UnboundKey};
use ring::rand::{SecureRandom, SystemRandom};

use super::context::LinkContext;
use super::keyring::{Keyring, MasterKey};
use crate::error::CryptoError;

/// Nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// Authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Output of a seal: ciphertext with appended tag, its nonce, and key version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedSecret {
    pub cipher_text: Vec<u8>,
    pub nonce: [u8; NONCE_LEN],
    pub key_version: u32,
}

/// Seals and opens secrets with keys drawn from an injected [`Keyring`].
#[derive(Debug, Clone)]
pub struct LinkCodec {
    keyring: Arc<Keyring>,
    rng: SystemRandom,
}

impl LinkCodec {
    pub fn new(keyring: Arc<Keyring>) -> Self {
        Self {
            keyring,
            rng: SystemRandom::new(),
        }
    }

    /// Encrypt `plaintext` under the active key, bound to `ctx`.
    pub fn seal(&self, plaintext: &[u8], ctx: &LinkContext<'_>) -> Result<SealedSecret, CryptoError> {
        let key_version = self.keyring.active_version();
        let key = less_safe_key(self.keyring.active_key()?)?;

        let mut nonce = [0u8; NONCE_LEN];
        self.rng.fill(&mut nonce).map_err(|_| CryptoError::Random)?;

        let aad = ctx.aad(key_version);
        let mut in_out = plaintext.to_vec();
        key.seal_in_place_append_tag(
            Nonce::assume_unique_for_key(nonce),
            Aad::from(aad.as_bytes()),
            &mut in_out,
        )
        .map_err(|_| CryptoError::SealFailed)?;

        Ok(SealedSecret {
            cipher_text: in_out,
            nonce,
            key_version,
        })
    }

    /// Decrypt `cipher_text` sealed under `key_version` for `ctx`.
    ///
    /// The tag is verified before any plaintext is returned.
    pub fn open(
        &self,
        cipher_text: &[u8],
        nonce: &[u8],
        ctx: &LinkContext<'_>,
        key_version: u32,
    ) -> Result<Vec<u8>, CryptoError> {
        let nonce: [u8; NONCE_LEN] = nonce
            .try_into()
            .map_err(|_| CryptoError::MalformedCiphertext)?;
        if cipher_text.len() < TAG_LEN {
            return Err(CryptoError::MalformedCiphertext);
        }
        let key = less_safe_key(self.keyring.key(key_version)?)?;

        let aad = ctx.aad(key_version);
        let mut in_out = cipher_text.to_vec();
        let plaintext = key
            .open_in_place(
                Nonce::assume_unique_for_key(nonce),
                Aad::from(aad.as_bytes()),
                &mut in_out,
            )
            .map_err(|_| CryptoError::AuthenticationFailure)?;

        Ok(plaintext.to_vec())
    }
}

fn less_safe_key(key: &MasterKey) -> Result<LessSafeKey, CryptoError> {
    let unbound = UnboundKey::new(&AES_256_GCM, key.as_bytes())
        .map_err(|_| CryptoError::InvalidKey("failed to create AES-256-GCM key".to_string()))?;
    Ok(LessSafeKey::new(unbound))
}
