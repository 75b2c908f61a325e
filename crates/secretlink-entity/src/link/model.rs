//! Link entity model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use secretlink_core::types::{LinkId, LinkOwner, UserId};

use super::state::LinkState;

/// A stored secret-sharing record.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Link {
    /// Store-assigned identifier.
    pub id: LinkId,
    /// Owning account; `None` for anonymous links.
    pub owner_user_id: Option<UserId>,
    /// Caller-chosen item identifier (empty for anonymous links).
    pub item_id: String,
    /// Public redemption token.
    pub link_token: String,
    /// Sealed secret followed by its tag. Empty once purged.
    #[serde(skip_serializing)]
    pub cipher_text: Vec<u8>,
    /// 96-bit nonce used to seal `cipher_text`.
    #[serde(skip_serializing)]
    pub nonce: Vec<u8>,
    /// Keyring version that sealed this record.
    pub key_version: i32,
    /// Stored passphrase digest; presence gates redemption.
    #[serde(skip_serializing)]
    pub passphrase_hash: Option<String>,
    /// When the link expires (`None` = never).
    pub expires_at: Option<DateTime<Utc>>,
    /// When the link was redeemed.
    pub used_at: Option<DateTime<Utc>>,
    /// When the link was deleted by its owner.
    pub deleted_at: Option<DateTime<Utc>>,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Typed owner of this link.
    pub fn owner(&self) -> LinkOwner {
        LinkOwner::from_column(self.owner_user_id)
    }

    /// Redeemable state at `now`.
    pub fn state_at(&self, now: DateTime<Utc>) -> LinkState {
        state_of(self.deleted_at, self.used_at, self.expires_at, now)
    }

    /// Whether a passphrase must be presented to redeem.
    pub fn is_passphrase_protected(&self) -> bool {
        self.passphrase_hash.is_some()
    }
}

/// Shared state derivation: deleted, then used, then expired, else active.
pub(crate) fn state_of(
    deleted_at: Option<DateTime<Utc>>,
    used_at: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> LinkState {
    if deleted_at.is_some() {
        LinkState::Deleted
    } else if used_at.is_some() {
        LinkState::Used
    } else if expires_at.is_some_and(|at| at <= now) {
        LinkState::Expired
    } else {
        LinkState::Active
    }
}

/// Data required to insert a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    /// Chosen before insert so the item reservation can name its holder.
    pub id: LinkId,
    /// Owner of the link.
    pub owner: LinkOwner,
    /// Item identifier.
    pub item_id: String,
    /// Public redemption token.
    pub link_token: String,
    /// Sealed secret followed by its tag.
    pub cipher_text: Vec<u8>,
    /// Nonce used to seal.
    pub nonce: Vec<u8>,
    /// Keyring version used to seal.
    pub key_version: i32,
    /// Stored passphrase digest.
    pub passphrase_hash: Option<String>,
    /// Expiry (`None` = never).
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn link() -> Link {
        Link {
            id: LinkId::new(),
            owner_user_id: None,
            item_id: String::new(),
            link_token: "token".to_string(),
            cipher_text: vec![1, 2, 3],
            nonce: vec![0; 12],
            key_version: 1,
            passphrase_hash: None,
            expires_at: None,
            used_at: None,
            deleted_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_never_expiring_link_stays_active() {
        let now = Utc::now();
        assert_eq!(
            link().state_at(now + Duration::days(10_000)),
            LinkState::Active
        );
    }

    #[test]
    fn test_expiry_is_inclusive() {
        let now = Utc::now();
        let mut l = link();
        l.expires_at = Some(now);
        assert_eq!(l.state_at(now), LinkState::Expired);
        assert_eq!(
            l.state_at(now - Duration::milliseconds(1)),
            LinkState::Active
        );
    }

    #[test]
    fn test_deleted_wins_over_used_and_expired() {
        let now = Utc::now();
        let mut l = link();
        l.expires_at = Some(now - Duration::days(1));
        l.used_at = Some(now);
        l.deleted_at = Some(now);
        assert_eq!(l.state_at(now), LinkState::Deleted);

        l.deleted_at = None;
        assert_eq!(l.state_at(now), LinkState::Used);

        l.used_at = None;
        assert_eq!(l.state_at(now), LinkState::Expired);
    }

    #[test]
    fn test_anonymous_owner() {
        assert!(link().owner().is_anonymous());
    }
}
