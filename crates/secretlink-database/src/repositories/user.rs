//! User repository implementation.

use sqlx::{PgConnection, PgPool};

use secretlink_core::error::{AppError, ErrorKind};
use secretlink_core::result::AppResult;
use secretlink_core::types::UserId;
use secretlink_entity::user::User;

/// Repository for user accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    /// Find a user by email, case-insensitively.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE lower(email) = lower($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Create a user. A taken email is reported as a conflict.
    pub async fn create(&self, email: &str, password_hash: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash) VALUES (lower($1), $2) RETURNING *",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return AppError::conflict("Email is already registered");
                }
            }
            AppError::with_source(ErrorKind::Database, "Failed to create user", e)
        })
    }

    /// Replace a user's password hash.
    pub async fn update_password(&self, id: UserId, password_hash: &str) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET password_hash = $2, password_changed_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update password", e))?;
        Ok(())
    }

    /// Delete a user's revoked API tokens. Returns how many were removed.
    pub async fn purge_revoked_tokens(&self, conn: &mut PgConnection, id: UserId) -> AppResult<u64> {
        sqlx::query("DELETE FROM api_tokens WHERE user_id = $1 AND revoked_at IS NOT NULL")
            .bind(id)
            .execute(conn)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to purge tokens", e))
    }

    /// Delete a user's links that can no longer be redeemed: deleted, used,
    /// or expired. Reservations held by expired links go with them.
    pub async fn purge_consumed_links(&self, conn: &mut PgConnection, id: UserId) -> AppResult<u64> {
        sqlx::query(
            "DELETE FROM links WHERE owner_user_id = $1 \
             AND (deleted_at IS NOT NULL OR used_at IS NOT NULL OR expires_at <= NOW())",
        )
        .bind(id)
        .execute(conn)
        .await
        .map(|r| r.rows_affected())
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to purge links", e))
    }

    /// Delete a user with all of their links, reservations, and tokens.
    ///
    /// Returns `false` when no such user exists. Audit rows are kept.
    pub async fn delete_with_data(&self, conn: &mut PgConnection, id: UserId) -> AppResult<bool> {
        for (statement, what) in [
            ("DELETE FROM links WHERE owner_user_id = $1", "links"),
            ("DELETE FROM items WHERE owner_user_id = $1", "items"),
            ("DELETE FROM api_tokens WHERE user_id = $1", "tokens"),
        ] {
            sqlx::query(statement)
                .bind(id)
                .execute(&mut *conn)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        format!("Failed to delete user {what}"),
                        e,
                    )
                })?;
        }

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;
        Ok(result.rows_affected() > 0)
    }
}
