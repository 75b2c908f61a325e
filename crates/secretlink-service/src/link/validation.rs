//! Per-row validation for bulk creation.

use chrono::{DateTime, Duration, Utc};

use secretlink_crypto::digest::is_client_passphrase_hash;

use super::model::BulkLinkRow;

pub const MAX_ITEM_ID_BYTES: usize = 320;
pub const MAX_SECRET_BYTES: usize = 4096;
pub const MAX_TTL_DAYS: i64 = 365;

/// A row that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRow<'a> {
    pub item_id: &'a str,
    pub secret: &'a str,
    pub passphrase_hash: Option<&'a str>,
    pub ttl_days: i64,
}

impl ValidRow<'_> {
    /// Expiry for a link created at `now`; a ttl of 0 never expires.
    pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        (self.ttl_days > 0).then(|| now + Duration::days(self.ttl_days))
    }
}

/// Validate one row. `item_id` is trimmed; an empty passphrase hash is absent.
pub fn validate_row(row: &BulkLinkRow) -> Result<ValidRow<'_>, &'static str> {
    let item_id = row.item_id.trim();
    if item_id.is_empty() || item_id.len() > MAX_ITEM_ID_BYTES {
        return Err("item_id must be 1-320 bytes");
    }
    if row.secret.is_empty() || row.secret.len() > MAX_SECRET_BYTES {
        return Err("secret must be 1-4096 bytes");
    }
    let ttl_days = row.ttl_days.unwrap_or(0);
    if !(0..=MAX_TTL_DAYS).contains(&ttl_days) {
        return Err("ttl_days must be between 0 and 365");
    }
    let passphrase_hash = row.passphrase_hash.as_deref().filter(|p| !p.is_empty());
    if passphrase_hash.is_some_and(|p| !is_client_passphrase_hash(p)) {
        return Err("passphrase_hash must be 64 lowercase hex characters");
    }

    Ok(ValidRow {
        item_id,
        secret: &row.secret,
        passphrase_hash,
        ttl_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(item_id: &str, secret: &str, ttl: Option<i64>) -> BulkLinkRow {
        BulkLinkRow {
            item_id: item_id.to_string(),
            secret: secret.to_string(),
            passphrase_hash: None,
            ttl_days: ttl,
        }
    }

    #[test]
    fn test_valid_row_is_trimmed() {
        let r = row("  db-pass ", "s3cr3t", Some(1));
        let valid = validate_row(&r).unwrap();
        assert_eq!(valid.item_id, "db-pass");
        assert_eq!(valid.ttl_days, 1);
    }

    #[test]
    fn test_item_id_bounds() {
        assert!(validate_row(&row("", "s", None)).is_err());
        assert!(validate_row(&row("   ", "s", None)).is_err());
        assert!(validate_row(&row(&"a".repeat(320), "s", None)).is_ok());
        assert!(validate_row(&row(&"a".repeat(321), "s", None)).is_err());
    }

    #[test]
    fn test_secret_bounds() {
        assert!(validate_row(&row("a", "", None)).is_err());
        assert!(validate_row(&row("a", &"x".repeat(4096), None)).is_ok());
        assert!(validate_row(&row("a", &"x".repeat(4097), None)).is_err());
    }

    #[test]
    fn test_ttl_bounds_inclusive() {
        assert!(validate_row(&row("a", "s", Some(-1))).is_err());
        assert!(validate_row(&row("a", "s", Some(0))).is_ok());
        assert!(validate_row(&row("a", "s", Some(365))).is_ok());
        assert!(validate_row(&row("a", "s", Some(366))).is_err());
    }

    #[test]
    fn test_ttl_zero_never_expires() {
        let now = Utc::now();
        let r = row("a", "s", None);
        assert_eq!(validate_row(&r).unwrap().expires_at(now), None);

        let r = row("a", "s", Some(1));
        assert_eq!(
            validate_row(&r).unwrap().expires_at(now),
            Some(now + Duration::days(1))
        );
    }

    #[test]
    fn test_passphrase_hash_shape() {
        let mut r = row("a", "s", None);
        r.passphrase_hash = Some("nothex".to_string());
        assert!(validate_row(&r).is_err());

        r.passphrase_hash = Some(String::new());
        assert_eq!(validate_row(&r).unwrap().passphrase_hash, None);

        r.passphrase_hash = Some("ab".repeat(32));
        assert!(validate_row(&r).unwrap().passphrase_hash.is_some());
    }
}
