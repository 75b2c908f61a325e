//! Request metadata passed into service methods.

use chrono::{DateTime, SubsecRound, Utc};

use secretlink_crypto::digest::ip_hash;
use secretlink_entity::audit::AuditMeta;

/// Longest User-Agent kept on audit rows, in bytes.
pub const MAX_USER_AGENT_BYTES: usize = 512;

/// Where a request came from and when it arrived.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Client IP address, if known.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received, at the store's microsecond precision.
    ///
    /// Lifecycle decisions and computed expiries use this instant, so a
    /// timestamp echoed in a response matches the one read back later.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(ip_address: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            ip_address,
            user_agent,
            request_time: Utc::now().trunc_subsecs(6),
        }
    }

    /// Audit metadata: hashed IP and truncated User-Agent.
    pub fn audit_meta(&self) -> AuditMeta {
        AuditMeta {
            ip_hash: self.ip_address.as_deref().map(ip_hash),
            user_agent: self
                .user_agent
                .as_deref()
                .map(|ua| truncate_bytes(ua, MAX_USER_AGENT_BYTES).to_string()),
        }
    }
}

/// Longest prefix of `value` within `max` bytes that ends on a char boundary.
fn truncate_bytes(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_meta_hashes_ip() {
        let ctx = RequestContext::new(Some("203.0.113.7".to_string()), Some("curl/8".to_string()));
        let meta = ctx.audit_meta();
        let hash = meta.ip_hash.unwrap();
        assert_eq!(hash.len(), 64);
        assert!(!hash.contains("203.0"));
        assert_eq!(meta.user_agent.as_deref(), Some("curl/8"));
    }

    #[test]
    fn test_user_agent_truncated_on_char_boundary() {
        // 'é' is two bytes; 257 of them straddle the limit.
        let ua = "é".repeat(257);
        let ctx = RequestContext::new(None, Some(ua));
        let kept = ctx.audit_meta().user_agent.unwrap();
        assert_eq!(kept.len(), MAX_USER_AGENT_BYTES);
        assert!(kept.chars().all(|c| c == 'é'));

        let odd = format!("a{}", "é".repeat(300));
        let kept = RequestContext::new(None, Some(odd)).audit_meta().user_agent.unwrap();
        assert_eq!(kept.len(), MAX_USER_AGENT_BYTES - 1);
    }

    #[test]
    fn test_context_without_client_has_no_meta() {
        assert_eq!(RequestContext::new(None, None).audit_meta(), AuditMeta::default());
    }

    #[test]
    fn test_request_time_has_microsecond_precision() {
        let ctx = RequestContext::new(None, None);
        assert_eq!(ctx.request_time.timestamp_subsec_nanos() % 1_000, 0);

        let row = crate::link::BulkLinkRow {
            item_id: "db-pass".to_string(),
            secret: "s3cr3t".to_string(),
            passphrase_hash: None,
            ttl_days: Some(1),
        };
        let valid = crate::link::validation::validate_row(&row).unwrap();
        let expires_at = valid.expires_at(ctx.request_time).unwrap();
        assert_eq!(expires_at.timestamp_subsec_nanos() % 1_000, 0);
    }
}
