//! Master key configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Keyring configuration.
///
/// Keys are 64 hex characters (256 bits) indexed by their version number.
/// The map keys are strings because configuration sources cannot express
/// integer map keys; they are parsed when the keyring is built.
#[derive(Clone, Serialize, Deserialize)]
pub struct CryptoConfig {
    /// Version used to seal new secrets.
    #[serde(default = "default_active_version")]
    pub active_key_version: u32,
    /// All key versions still able to open stored secrets.
    #[serde(default)]
    pub keys: HashMap<String, String>,
}

impl std::fmt::Debug for CryptoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut versions: Vec<&String> = self.keys.keys().collect();
        versions.sort();
        f.debug_struct("CryptoConfig")
            .field("active_key_version", &self.active_key_version)
            .field("key_versions", &versions)
            .finish()
    }
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            active_key_version: default_active_version(),
            keys: HashMap::new(),
        }
    }
}

fn default_active_version() -> u32 {
    1
}
