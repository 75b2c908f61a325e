//! Derived redeemable state of a link.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Redeemable state of a link at a given instant.
///
/// Only `Deleted` and `Used` are stored transitions; `Expired` is computed
/// lazily from `expires_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkState {
    /// Live and redeemable.
    Active,
    /// Redeemed once; plaintext purged.
    Used,
    /// Deleted by its owner; plaintext purged.
    Deleted,
    /// Past its expiry timestamp.
    Expired,
}

impl LinkState {
    /// Returns `true` if the link may still be redeemed or deleted.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Return the state as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Used => "used",
            Self::Deleted => "deleted",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
