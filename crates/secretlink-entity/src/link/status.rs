//! Dashboard projection of a link.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::model::state_of;
use super::state::LinkState;

/// Columns selected for a status listing. Never includes sealed data.
#[derive(Debug, Clone, FromRow)]
pub struct LinkStatusRow {
    pub item_id: String,
    pub link_token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub used_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Status of a single link as reported to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkStatus {
    pub item_id: String,
    pub link_token: String,
    pub status: LinkState,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub used_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl LinkStatus {
    /// Project a row, deriving its state at `now`.
    pub fn from_row(row: LinkStatusRow, now: DateTime<Utc>) -> Self {
        let status = state_of(row.deleted_at, row.used_at, row.expires_at, now);
        Self {
            item_id: row.item_id,
            link_token: row.link_token,
            status,
            created_at: row.created_at,
            expires_at: row.expires_at,
            used_at: row.used_at,
            deleted_at: row.deleted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_projection_derives_expired() {
        let now = Utc::now();
        let row = LinkStatusRow {
            item_id: "db-pass".to_string(),
            link_token: "tok".to_string(),
            created_at: now - Duration::days(2),
            expires_at: Some(now - Duration::days(1)),
            used_at: None,
            deleted_at: None,
        };
        let status = LinkStatus::from_row(row, now);
        assert_eq!(status.status, LinkState::Expired);

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["status"], "expired");
        assert!(json.get("cipher_text").is_none());
    }
}
