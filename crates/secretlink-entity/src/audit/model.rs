//! Audit entry entity model.

use std::fmt;

use serde::{Deserialize, Serialize};

use secretlink_core::types::{LinkId, LinkOwner};

/// Lifecycle event recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEvent {
    LinkCreated,
    LinkRedeemed,
    LinkDeleted,
}

impl AuditEvent {
    /// Return the event as stored in `audits.event_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LinkCreated => "LINK_CREATED",
            Self::LinkRedeemed => "LINK_REDEEMED",
            Self::LinkDeleted => "LINK_DELETED",
        }
    }
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request metadata attached to audit rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditMeta {
    pub ip_hash: Option<String>,
    pub user_agent: Option<String>,
}

/// Data required to append an audit row.
#[derive(Debug, Clone)]
pub struct NewAuditEntry<'a> {
    pub owner: LinkOwner,
    pub item_id: &'a str,
    pub link_id: LinkId,
    pub event: AuditEvent,
    pub meta: &'a AuditMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_strings() {
        assert_eq!(AuditEvent::LinkCreated.as_str(), "LINK_CREATED");
        assert_eq!(AuditEvent::LinkRedeemed.to_string(), "LINK_REDEEMED");
        assert_eq!(
            serde_json::to_string(&AuditEvent::LinkDeleted).unwrap(),
            "\"LINK_DELETED\""
        );
    }
}
