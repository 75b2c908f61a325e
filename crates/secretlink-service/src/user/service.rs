//! Account operations behind the browser session.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use secretlink_auth::jwt::SessionEncoder;
use secretlink_auth::password::{PasswordHasher, PasswordValidator};
use secretlink_core::error::AppError;
use secretlink_core::result::AppResult;
use secretlink_core::types::UserId;
use secretlink_database::DatabasePool;
use secretlink_database::connection::commit;
use secretlink_database::repositories::UserRepository;
use secretlink_entity::user::User;

/// Longest accepted email address, in bytes.
pub const MAX_EMAIL_BYTES: usize = 320;

/// A signed session issued on login.
#[derive(Debug, Clone)]
pub struct SessionGrant {
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Rows removed by a purge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurgeSummary {
    pub tokens: u64,
    pub links: u64,
}

/// Handles account lifecycle and credentials.
#[derive(Debug, Clone)]
pub struct UserService {
    db: DatabasePool,
    users: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    sessions: Arc<SessionEncoder>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        db: DatabasePool,
        users: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        sessions: Arc<SessionEncoder>,
    ) -> Self {
        Self {
            db,
            users,
            hasher,
            validator,
            sessions,
        }
    }

    /// Register a new account and sign it in. A taken email is a conflict.
    pub async fn signup(&self, email: &str, password: &str) -> AppResult<SessionGrant> {
        let email = normalize_email(email)?;
        self.validator.validate(password, &[email.as_str()])?;

        let hash = self.hasher.hash_password(password)?;
        let user = self.users.create(&email, &hash).await?;
        info!(user_id = %user.id, "User registered");

        self.grant(user)
    }

    /// Check credentials and issue a session.
    ///
    /// Unknown emails and wrong passwords are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<SessionGrant> {
        let email = email.trim();
        let Some(user) = self.users.find_by_email(email).await? else {
            warn!("Login attempt for unknown account");
            return Err(AppError::unauthorized("Invalid credentials"));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        info!(user_id = %user.id, "User logged in");
        self.grant(user)
    }

    /// The account behind the current session.
    pub async fn me(&self, user_id: UserId) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Change the password after verifying the current one.
    pub async fn change_password(
        &self,
        user_id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self.me(user_id).await?;

        if !self
            .hasher
            .verify_password(current_password, &user.password_hash)?
        {
            return Err(AppError::unauthorized("Current password is incorrect"));
        }

        self.validator
            .validate_not_same(current_password, new_password)?;
        self.validator.validate(new_password, &[user.email.as_str()])?;

        let hash = self.hasher.hash_password(new_password)?;
        self.users.update_password(user_id, &hash).await?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// Drop revoked tokens and links that can no longer be redeemed.
    pub async fn purge(&self, user_id: UserId) -> AppResult<PurgeSummary> {
        let mut tx = self.db.begin().await?;
        let tokens = self.users.purge_revoked_tokens(&mut *tx, user_id).await?;
        let links = self.users.purge_consumed_links(&mut *tx, user_id).await?;
        commit(tx).await?;

        info!(user_id = %user_id, tokens, links, "Purged account data");
        Ok(PurgeSummary { tokens, links })
    }

    /// Delete the account together with its links, reservations, and tokens.
    pub async fn delete_account(&self, user_id: UserId) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        if !self.users.delete_with_data(&mut *tx, user_id).await? {
            return Err(AppError::not_found("User not found"));
        }
        commit(tx).await?;

        info!(user_id = %user_id, "Account deleted");
        Ok(())
    }

    fn grant(&self, user: User) -> AppResult<SessionGrant> {
        let (token, expires_at) = self.sessions.issue(user.id)?;
        Ok(SessionGrant {
            user,
            token,
            expires_at,
        })
    }
}

/// Trim and lowercase an email, rejecting obviously malformed input.
fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim();
    if email.is_empty() || email.len() > MAX_EMAIL_BYTES {
        return Err(AppError::validation(format!(
            "Email must be 1-{MAX_EMAIL_BYTES} bytes"
        )));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {
            Ok(email.to_lowercase())
        }
        _ => Err(AppError::validation("Invalid email format")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send<T: Send>(_: T) {}

    #[allow(dead_code)]
    fn account_futures_are_send(service: &UserService, user_id: UserId) {
        assert_send(service.purge(user_id));
        assert_send(service.delete_account(user_id));
    }

    #[test]
    fn test_normalize_email_lowercases_and_trims() {
        assert_eq!(
            normalize_email("  Alice@Example.COM ").unwrap(),
            "alice@example.com"
        );
    }

    #[test]
    fn test_normalize_email_rejects_malformed() {
        assert!(normalize_email("").is_err());
        assert!(normalize_email("no-at-sign").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("alice@localhost").is_err());
        assert!(normalize_email(&format!("{}@example.com", "a".repeat(320))).is_err());
    }
}
