//! Account credential policy.

use serde::{Deserialize, Serialize};

/// Password policy for user accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Maximum password length.
    #[serde(default = "default_password_max")]
    pub password_max_length: usize,
    /// Minimum zxcvbn strength score (0-4).
    #[serde(default = "default_min_score")]
    pub password_min_score: u8,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_min_length: default_password_min(),
            password_max_length: default_password_max(),
            password_min_score: default_min_score(),
        }
    }
}

fn default_password_min() -> usize {
    8
}

fn default_password_max() -> usize {
    128
}

fn default_min_score() -> u8 {
    2
}
