//! Versioned master keys.
//!
//! The keyring is built once at startup and injected into the codec, so
//! tests can substitute deterministic keys.

use std::collections::HashMap;
use std::fmt;

use ring::rand::{SecureRandom, SystemRandom};
use secretlink_core::config::crypto::CryptoConfig;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CryptoError;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// A 256-bit master key. Wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey([u8; KEY_LEN]);

impl MasterKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a key from 64 hex characters.
    pub fn from_hex(value: &str) -> Result<Self, CryptoError> {
        let mut bytes = [0u8; KEY_LEN];
        hex::decode_to_slice(value.trim(), &mut bytes).map_err(|_| {
            CryptoError::InvalidKey(format!("expected {} hex characters", KEY_LEN * 2))
        })?;
        Ok(Self(bytes))
    }

    /// Draw a fresh key from the system CSPRNG.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut bytes = [0u8; KEY_LEN];
        SystemRandom::new()
            .fill(&mut bytes)
            .map_err(|_| CryptoError::Random)?;
        Ok(Self(bytes))
    }

    /// Hex encoding of the key, for operator tooling only.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey(<redacted>)")
    }
}

/// Master keys indexed by version, with one version active for sealing.
#[derive(Debug, Clone)]
pub struct Keyring {
    active_version: u32,
    keys: HashMap<u32, MasterKey>,
}

impl Keyring {
    /// Build a keyring. The active version must be present.
    pub fn new(active_version: u32, keys: HashMap<u32, MasterKey>) -> Result<Self, CryptoError> {
        if !keys.contains_key(&active_version) {
            return Err(CryptoError::InvalidKey(format!(
                "active key version {active_version} has no key"
            )));
        }
        Ok(Self {
            active_version,
            keys,
        })
    }

    /// A keyring holding a single key.
    pub fn single(version: u32, key: MasterKey) -> Self {
        Self {
            active_version: version,
            keys: HashMap::from([(version, key)]),
        }
    }

    /// Build from the `crypto` configuration section.
    pub fn from_config(config: &CryptoConfig) -> Result<Self, CryptoError> {
        let mut keys = HashMap::with_capacity(config.keys.len());
        for (version, value) in &config.keys {
            let version: u32 = version.trim().parse().map_err(|_| {
                CryptoError::InvalidKey(format!("key version '{version}' is not an integer"))
            })?;
            let key = MasterKey::from_hex(value).map_err(|_| {
                CryptoError::InvalidKey(format!(
                    "key version {version}: expected {} hex characters",
                    KEY_LEN * 2
                ))
            })?;
            keys.insert(version, key);
        }
        Self::new(config.active_key_version, keys)
    }

    /// Version used for new seals.
    pub fn active_version(&self) -> u32 {
        self.active_version
    }

    /// Key for `version`.
    pub fn key(&self, version: u32) -> Result<&MasterKey, CryptoError> {
        self.keys
            .get(&version)
            .ok_or(CryptoError::UnknownKeyVersion(version))
    }

    /// Key used for new seals.
    pub fn active_key(&self) -> Result<&MasterKey, CryptoError> {
        self.key(self.active_version)
    }

    /// All held versions, ascending.
    pub fn versions(&self) -> Vec<u32> {
        let mut versions: Vec<u32> = self.keys.keys().copied().collect();
        versions.sort_unstable();
        versions
    }
}
