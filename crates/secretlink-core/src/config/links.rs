//! Link lifecycle limits.

use serde::{Deserialize, Serialize};

/// Limits applied by the link lifecycle engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Lifetime of anonymously created links.
    #[serde(default = "default_anonymous_ttl")]
    pub anonymous_ttl_days: i64,
    /// Largest secret accepted on the anonymous endpoint.
    #[serde(default = "default_anonymous_max")]
    pub anonymous_secret_max_bytes: usize,
    /// Largest accepted bulk request.
    #[serde(default = "default_bulk_max")]
    pub bulk_max_rows: usize,
    /// Maximum rows returned by a status listing.
    #[serde(default = "default_page_size")]
    pub status_page_size: i64,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            anonymous_ttl_days: default_anonymous_ttl(),
            anonymous_secret_max_bytes: default_anonymous_max(),
            bulk_max_rows: default_bulk_max(),
            status_page_size: default_page_size(),
        }
    }
}

fn default_anonymous_ttl() -> i64 {
    7
}

fn default_anonymous_max() -> usize {
    64
}

fn default_bulk_max() -> usize {
    1000
}

fn default_page_size() -> i64 {
    10_000
}
