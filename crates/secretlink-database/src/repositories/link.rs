//! Link store: links, item reservations, and audit rows.
//!
//! Every mutation takes the caller's transaction connection so a whole
//! create, redeem, or delete commits or rolls back as one unit.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use secretlink_core::error::{AppError, ErrorKind};
use secretlink_core::result::AppResult;
use secretlink_core::types::{LinkId, UserId};
use secretlink_entity::audit::NewAuditEntry;
use secretlink_entity::link::{Link, LinkStatusRow, NewLink};

/// Repository for link records and their reservations.
#[derive(Debug, Clone)]
pub struct LinkRepository {
    pool: PgPool,
}

impl LinkRepository {
    /// Create a new link repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Reserve `item_id` for `owner` on behalf of the link `holder`.
    ///
    /// Returns [`ErrorKind::Conflict`] when the pair is already reserved. The
    /// conflict is detected without raising a constraint error, so the
    /// surrounding transaction stays usable. The holder row may be inserted
    /// later in the same transaction; the foreign key is checked at commit.
    pub async fn insert_item(
        &self,
        conn: &mut PgConnection,
        owner: UserId,
        item_id: &str,
        holder: LinkId,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "INSERT INTO items (owner_user_id, item_id, link_id) VALUES ($1, $2, $3) \
             ON CONFLICT (owner_user_id, item_id) DO NOTHING",
        )
        .bind(owner)
        .bind(item_id)
        .bind(holder)
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reserve item", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::conflict(format!(
                "Item '{item_id}' is already reserved"
            )));
        }
        Ok(())
    }

    /// Insert a link under its preassigned id.
    pub async fn insert_link(&self, conn: &mut PgConnection, link: &NewLink) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO links (id, owner_user_id, item_id, link_token, cipher_text, nonce, \
             key_version, passphrase_hash, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(link.id)
        .bind(link.owner.to_column())
        .bind(&link.item_id)
        .bind(&link.link_token)
        .bind(&link.cipher_text)
        .bind(&link.nonce)
        .bind(link.key_version)
        .bind(&link.passphrase_hash)
        .bind(link.expires_at)
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert link", e))?;
        Ok(())
    }

    /// Lock the newest link for `(owner, item_id)` that is neither used nor
    /// deleted. The caller decides whether it has expired.
    pub async fn find_unconsumed_for_item_for_update(
        &self,
        conn: &mut PgConnection,
        owner: UserId,
        item_id: &str,
    ) -> AppResult<Option<Link>> {
        sqlx::query_as::<_, Link>(
            "SELECT * FROM links \
             WHERE owner_user_id = $1 AND item_id = $2 \
               AND used_at IS NULL AND deleted_at IS NULL \
             ORDER BY created_at DESC LIMIT 1 FOR UPDATE",
        )
        .bind(owner)
        .bind(item_id)
        .fetch_optional(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find link for item", e))
    }

    /// Fetch a link by token, holding an exclusive row lock until the
    /// transaction ends. Concurrent redeems and deletes of one token
    /// serialize here.
    pub async fn fetch_by_token_for_update(
        &self,
        conn: &mut PgConnection,
        token: &str,
    ) -> AppResult<Link> {
        sqlx::query_as::<_, Link>("SELECT * FROM links WHERE link_token = $1 FOR UPDATE")
            .bind(token)
            .fetch_optional(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch link", e))?
            .ok_or_else(|| AppError::not_found("Link not found"))
    }

    /// Mark a link used and purge its ciphertext and passphrase digest.
    pub async fn mark_used_and_purge(&self, conn: &mut PgConnection, id: LinkId) -> AppResult<DateTime<Utc>> {
        sqlx::query_scalar::<_, DateTime<Utc>>(
            "UPDATE links SET used_at = NOW(), cipher_text = ''::bytea, passphrase_hash = NULL \
             WHERE id = $1 RETURNING used_at",
        )
        .bind(id)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark link used", e))
    }

    /// Mark a link deleted and purge its ciphertext.
    pub async fn mark_deleted_and_purge(&self, conn: &mut PgConnection, id: LinkId) -> AppResult<()> {
        sqlx::query("UPDATE links SET deleted_at = NOW(), cipher_text = ''::bytea WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark link deleted", e))?;
        Ok(())
    }

    /// Release the reservation held by `holder`, if any.
    ///
    /// Keyed by holder rather than by item id, so a reservation that a newer
    /// link took over is never released on behalf of a stale one. Anonymous
    /// links hold none.
    pub async fn delete_item_reservation(
        &self,
        conn: &mut PgConnection,
        holder: LinkId,
    ) -> AppResult<()> {
        sqlx::query("DELETE FROM items WHERE link_id = $1")
            .bind(holder)
            .execute(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to release item", e))?;
        Ok(())
    }

    /// Append an audit row.
    pub async fn insert_audit(&self, conn: &mut PgConnection, entry: &NewAuditEntry<'_>) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO audits (owner_user_id, item_id, link_id, event_type, ip_hash, user_agent) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(entry.owner.to_column())
        .bind(entry.item_id)
        .bind(entry.link_id)
        .bind(entry.event.as_str())
        .bind(&entry.meta.ip_hash)
        .bind(&entry.meta.user_agent)
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to write audit entry", e))?;
        Ok(())
    }

    /// Status rows for an owner, newest first, optionally bounded by
    /// `since <= created_at < until`.
    pub async fn list_by_owner(
        &self,
        owner: UserId,
        since: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
        limit: i64,
    ) -> AppResult<Vec<LinkStatusRow>> {
        sqlx::query_as::<_, LinkStatusRow>(
            "SELECT item_id, link_token, created_at, expires_at, used_at, deleted_at \
             FROM links \
             WHERE owner_user_id = $1 \
               AND ($2::timestamptz IS NULL OR created_at >= $2) \
               AND ($3::timestamptz IS NULL OR created_at < $3) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $4",
        )
        .bind(owner)
        .bind(since)
        .bind(until)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list links", e))
    }
}
