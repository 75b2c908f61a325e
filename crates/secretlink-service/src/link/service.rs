//! Create, redeem, delete, and list links.
//!
//! Each mutation runs in one bounded transaction: the row lock taken by
//! `fetch_by_token_for_update` is held until commit or rollback, so two
//! concurrent redemptions of one token serialize and only one succeeds.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{error, info};

use secretlink_core::config::app::ServerConfig;
use secretlink_core::config::links::LinksConfig;
use secretlink_core::error::{AppError, ErrorKind};
use secretlink_core::result::AppResult;
use secretlink_core::types::{LinkId, LinkOwner, UserId};
use secretlink_crypto::digest::{passphrase_digest, verify_passphrase};
use secretlink_crypto::token::new_link_token;
use secretlink_crypto::{LinkCodec, LinkContext};
use secretlink_database::connection::commit;
use secretlink_database::repositories::LinkRepository;
use secretlink_database::{DatabasePool, Transaction};
use secretlink_entity::audit::{AuditEvent, AuditMeta, NewAuditEntry};
use secretlink_entity::link::{LinkState, LinkStatus, NewLink};

use super::model::{BulkLinkRow, LinkCreateResult, RedeemedSecret};
use super::validation::{ValidRow, validate_row};
use crate::context::RequestContext;

/// The link lifecycle engine.
#[derive(Debug, Clone)]
pub struct LinkService {
    db: DatabasePool,
    links: Arc<LinkRepository>,
    codec: Arc<LinkCodec>,
    server: Arc<ServerConfig>,
    limits: Arc<LinksConfig>,
}

/// A link written inside a transaction, logged once it commits.
struct CreatedLink {
    owner: LinkOwner,
    item_id: String,
    link_id: LinkId,
}

enum RowOutcome {
    Created(LinkCreateResult, CreatedLink),
    Duplicate(LinkCreateResult),
}

impl LinkService {
    pub fn new(
        db: DatabasePool,
        links: Arc<LinkRepository>,
        codec: Arc<LinkCodec>,
        server: Arc<ServerConfig>,
        limits: Arc<LinksConfig>,
    ) -> Self {
        Self {
            db,
            links,
            codec,
            server,
            limits,
        }
    }

    /// Create a single anonymous link with the fixed anonymous lifetime.
    ///
    /// Anonymous links use an empty item id and are never deduplicated.
    pub async fn create_anonymous(
        &self,
        ctx: &RequestContext,
        secret: &str,
    ) -> AppResult<LinkCreateResult> {
        let max = self.limits.anonymous_secret_max_bytes;
        if secret.is_empty() || secret.len() > max {
            return Err(AppError::validation(format!(
                "secret must be 1-{max} bytes"
            )));
        }

        let expires_at = Some(ctx.request_time + Duration::days(self.limits.anonymous_ttl_days));
        let meta = ctx.audit_meta();

        let mut tx = self.db.begin().await?;
        let (result, created) = self
            .seal_and_insert(
                &mut tx,
                LinkId::new(),
                LinkOwner::Anonymous,
                "",
                secret,
                None,
                expires_at,
                &meta,
            )
            .await?;
        commit(tx).await?;

        log_created(&created);
        Ok(result)
    }

    /// Create owned links in bulk, one result per row in request order.
    ///
    /// Rows are validated and rejected individually; only store failures
    /// abort the whole batch.
    pub async fn create_bulk(
        &self,
        ctx: &RequestContext,
        owner: UserId,
        rows: &[BulkLinkRow],
    ) -> AppResult<Vec<LinkCreateResult>> {
        let max = self.limits.bulk_max_rows;
        if rows.is_empty() || rows.len() > max {
            return Err(AppError::validation(format!(
                "Request must contain between 1 and {max} rows"
            )));
        }

        let now = ctx.request_time;
        let meta = ctx.audit_meta();
        let mut results = Vec::with_capacity(rows.len());
        let mut created = Vec::new();

        let mut tx = self.db.begin().await?;
        for row in rows {
            let valid = match validate_row(row) {
                Ok(valid) => valid,
                Err(reason) => {
                    results.push(LinkCreateResult::invalid(row.item_id.trim(), reason));
                    continue;
                }
            };

            match self.create_owned(&mut tx, owner, &valid, now, &meta).await? {
                RowOutcome::Created(result, link) => {
                    results.push(result);
                    created.push(link);
                }
                RowOutcome::Duplicate(result) => results.push(result),
            }
        }
        commit(tx).await?;

        for link in &created {
            log_created(link);
        }
        Ok(results)
    }

    /// Create one owned link, or report that a live link already holds the item.
    async fn create_owned(
        &self,
        tx: &mut Transaction,
        owner: UserId,
        row: &ValidRow<'_>,
        now: DateTime<Utc>,
        meta: &AuditMeta,
    ) -> AppResult<RowOutcome> {
        let existing = self
            .links
            .find_unconsumed_for_item_for_update(&mut **tx, owner, row.item_id)
            .await?;

        if let Some(existing) = existing {
            if existing.state_at(now).is_active() {
                return Ok(RowOutcome::Duplicate(LinkCreateResult::duplicate(
                    row.item_id,
                    existing.expires_at,
                )));
            }
            // The holder has expired; free its own reservation. A racing
            // create that already replaced it keeps its reservation, and the
            // insert below then reports a duplicate.
            self.links
                .delete_item_reservation(&mut **tx, existing.id)
                .await?;
        }

        let link_id = LinkId::new();
        match self.links.insert_item(&mut **tx, owner, row.item_id, link_id).await {
            Ok(()) => {}
            Err(e) if e.kind == ErrorKind::Conflict => {
                return Ok(RowOutcome::Duplicate(LinkCreateResult::duplicate(
                    row.item_id,
                    None,
                )));
            }
            Err(e) => return Err(e),
        }

        let passphrase_hash = row.passphrase_hash.map(passphrase_digest);
        let (result, created) = self
            .seal_and_insert(
                tx,
                link_id,
                LinkOwner::User(owner),
                row.item_id,
                row.secret,
                passphrase_hash,
                row.expires_at(now),
                meta,
            )
            .await?;
        Ok(RowOutcome::Created(result, created))
    }

    #[allow(clippy::too_many_arguments)]
    async fn seal_and_insert(
        &self,
        tx: &mut Transaction,
        link_id: LinkId,
        owner: LinkOwner,
        item_id: &str,
        secret: &str,
        passphrase_hash: Option<String>,
        expires_at: Option<DateTime<Utc>>,
        meta: &AuditMeta,
    ) -> AppResult<(LinkCreateResult, CreatedLink)> {
        let link_token = new_link_token()?;
        let sealed = self.codec.seal(
            secret.as_bytes(),
            &LinkContext::new(owner, item_id, &link_token),
        )?;

        let new_link = NewLink {
            id: link_id,
            owner,
            item_id: item_id.to_string(),
            link_token,
            cipher_text: sealed.cipher_text,
            nonce: sealed.nonce.to_vec(),
            key_version: key_version_column(sealed.key_version)?,
            passphrase_hash,
            expires_at,
        };
        self.links.insert_link(&mut **tx, &new_link).await?;

        self.links
            .insert_audit(
                &mut **tx,
                &NewAuditEntry {
                    owner,
                    item_id,
                    link_id,
                    event: AuditEvent::LinkCreated,
                    meta,
                },
            )
            .await?;

        let link_url = self.server.link_url(&new_link.link_token);
        Ok((
            LinkCreateResult::created(item_id, new_link.link_token, link_url, expires_at),
            CreatedLink {
                owner,
                item_id: new_link.item_id,
                link_id,
            },
        ))
    }

    /// Redeem a link, returning its plaintext exactly once.
    ///
    /// Guards run in order: missing token, gone, passphrase. The ciphertext
    /// is only opened after all of them pass.
    pub async fn redeem(
        &self,
        ctx: &RequestContext,
        token: &str,
        passphrase: Option<&str>,
    ) -> AppResult<RedeemedSecret> {
        let mut tx = self.db.begin().await?;
        let link = self.links.fetch_by_token_for_update(&mut *tx, token).await?;

        if !link.state_at(ctx.request_time).is_active() {
            return Err(AppError::gone("Link expired, deleted, or already used"));
        }

        if let Some(stored) = link.passphrase_hash.as_deref() {
            let Some(supplied) = passphrase.filter(|p| !p.is_empty()) else {
                return Err(AppError::passphrase_required(
                    "This link requires a passphrase",
                ));
            };
            if !verify_passphrase(supplied, stored) {
                return Err(AppError::invalid_passphrase("Passphrase is incorrect"));
            }
        }

        let owner = link.owner();
        let ctx_fields = LinkContext::new(owner, &link.item_id, &link.link_token);
        let key_version = u32::try_from(link.key_version)
            .map_err(|_| AppError::crypto(format!("Invalid key version {}", link.key_version)))?;
        let plaintext = self
            .codec
            .open(&link.cipher_text, &link.nonce, &ctx_fields, key_version)
            .map_err(|e| {
                error!(link_id = %link.id, key_version, error = %e, "Failed to open sealed secret");
                AppError::from(e)
            })?;
        let secret = String::from_utf8(plaintext)
            .map_err(|e| AppError::with_source(ErrorKind::Crypto, "Secret is not valid UTF-8", e))?;

        let redeemed_at = self.links.mark_used_and_purge(&mut *tx, link.id).await?;
        self.links.delete_item_reservation(&mut *tx, link.id).await?;
        self.links
            .insert_audit(
                &mut *tx,
                &NewAuditEntry {
                    owner,
                    item_id: &link.item_id,
                    link_id: link.id,
                    event: AuditEvent::LinkRedeemed,
                    meta: &ctx.audit_meta(),
                },
            )
            .await?;
        commit(tx).await?;

        info!(
            event = AuditEvent::LinkRedeemed.as_str(),
            owner = %owner,
            item_id = %link.item_id,
            link_id = %link.id,
            "Link redeemed"
        );

        Ok(RedeemedSecret {
            item_id: link.item_id,
            secret,
            redeemed_at,
        })
    }

    /// Delete a live link owned by `owner` and purge its ciphertext.
    ///
    /// Missing, foreign, and already-deleted links are `NOT_FOUND`; used or
    /// expired links are `LINK_GONE`.
    pub async fn delete(&self, ctx: &RequestContext, owner: UserId, token: &str) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        let link = self.links.fetch_by_token_for_update(&mut *tx, token).await?;

        if !link.owner().is_owned_by(owner) {
            return Err(AppError::not_found("Link not found"));
        }
        match link.state_at(ctx.request_time) {
            LinkState::Active => {}
            LinkState::Deleted => return Err(AppError::not_found("Link not found")),
            LinkState::Used | LinkState::Expired => {
                return Err(AppError::gone("Link expired or already used"));
            }
        }

        let link_owner = link.owner();
        self.links.mark_deleted_and_purge(&mut *tx, link.id).await?;
        self.links.delete_item_reservation(&mut *tx, link.id).await?;
        self.links
            .insert_audit(
                &mut *tx,
                &NewAuditEntry {
                    owner: link_owner,
                    item_id: &link.item_id,
                    link_id: link.id,
                    event: AuditEvent::LinkDeleted,
                    meta: &ctx.audit_meta(),
                },
            )
            .await?;
        commit(tx).await?;

        info!(
            event = AuditEvent::LinkDeleted.as_str(),
            owner = %link_owner,
            item_id = %link.item_id,
            link_id = %link.id,
            "Link deleted"
        );
        Ok(())
    }

    /// Status of an owner's links, newest first, capped at the page size.
    pub async fn list_status(
        &self,
        owner: UserId,
        since: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<LinkStatus>> {
        let rows = self
            .links
            .list_by_owner(owner, since, until, self.limits.status_page_size)
            .await?;
        let now = Utc::now();
        Ok(rows
            .into_iter()
            .map(|row| LinkStatus::from_row(row, now))
            .collect())
    }
}

fn key_version_column(version: u32) -> AppResult<i32> {
    i32::try_from(version)
        .map_err(|_| AppError::crypto(format!("Key version {version} does not fit the store")))
}

fn log_created(link: &CreatedLink) {
    info!(
        event = AuditEvent::LinkCreated.as_str(),
        owner = %link.owner,
        item_id = %link.item_id,
        link_id = %link.link_id,
        "Link created"
    );
}
