//! Row context bound into every seal.

use secretlink_core::types::LinkOwner;

/// Fields of a link row that are authenticated alongside its secret.
///
/// Swapping ciphertext between rows changes at least one of these fields,
/// so the tag no longer verifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkContext<'a> {
    pub owner: LinkOwner,
    pub item_id: &'a str,
    pub link_token: &'a str,
}

impl<'a> LinkContext<'a> {
    pub fn new(owner: LinkOwner, item_id: &'a str, link_token: &'a str) -> Self {
        Self {
            owner,
            item_id,
            link_token,
        }
    }

    /// Canonical AAD: field names sorted, `field:value` pairs joined by `|`.
    pub fn aad(&self, key_version: u32) -> String {
        format!(
            "item_id:{}|key_version:{}|link_token:{}|owner_user_id:{}",
            self.item_id, key_version, self.link_token, self.owner
        )
    }
}
