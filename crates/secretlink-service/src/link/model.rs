//! Inputs and outputs of the link lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of a bulk create request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkLinkRow {
    /// Caller-chosen identifier, unique per owner while live.
    #[serde(default)]
    pub item_id: String,
    /// Plaintext secret.
    #[serde(default)]
    pub secret: String,
    /// Client-side SHA-256 hex of the passphrase.
    #[serde(default)]
    pub passphrase_hash: Option<String>,
    /// Days until expiry; 0 never expires.
    #[serde(default)]
    pub ttl_days: Option<i64>,
}

/// Outcome of one create attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreateStatus {
    Created,
    DuplicateItemId,
    InvalidItemId,
}

/// Result reported for every create attempt, in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkCreateResult {
    pub item_id: String,
    pub status: CreateStatus,
    pub link_token: Option<String>,
    pub link_url: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl LinkCreateResult {
    pub fn created(
        item_id: impl Into<String>,
        link_token: String,
        link_url: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            status: CreateStatus::Created,
            link_token: Some(link_token),
            link_url: Some(link_url),
            expires_at,
            error: None,
        }
    }

    /// A live link already holds this item; reports the holder's expiry.
    pub fn duplicate(item_id: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            item_id: item_id.into(),
            status: CreateStatus::DuplicateItemId,
            link_token: None,
            link_url: None,
            expires_at,
            error: None,
        }
    }

    pub fn invalid(item_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            status: CreateStatus::InvalidItemId,
            link_token: None,
            link_url: None,
            expires_at: None,
            error: Some(error.into()),
        }
    }
}

/// Plaintext returned exactly once by a successful redemption.
#[derive(Debug, Clone, Serialize)]
pub struct RedeemedSecret {
    pub item_id: String,
    pub secret: String,
    pub redeemed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_shape() {
        let json = serde_json::to_value(LinkCreateResult::invalid("x", "Bad payload")).unwrap();
        assert_eq!(json["status"], "invalid_item_id");
        assert!(json["link_token"].is_null());
        assert!(json["link_url"].is_null());
        assert!(json["expires_at"].is_null());
        assert_eq!(json["error"], "Bad payload");

        let json = serde_json::to_value(LinkCreateResult::duplicate("x", None)).unwrap();
        assert_eq!(json["status"], "duplicate_item_id");
        assert!(json["error"].is_null());
    }

    #[test]
    fn test_row_defaults() {
        let row: BulkLinkRow = serde_json::from_str(r#"{"item_id":"a","secret":"b"}"#).unwrap();
        assert_eq!(row.ttl_days, None);
        assert_eq!(row.passphrase_hash, None);
    }
}
