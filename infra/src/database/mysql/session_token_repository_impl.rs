//! MySQL implementation of the SessionTokenRepository trait.
//!
//! Token rows are looked up by their opaque value; freshness predicates and
//! the sliding refresh are pushed into single SQL statements so concurrent
//! verifications and sweeps cannot race on a stale snapshot.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE session_tokens (
//!     token        VARCHAR(64)  NOT NULL PRIMARY KEY,
//!     user_id      CHAR(36)     NOT NULL,
//!     last_used_at TIMESTAMP(3) NOT NULL,
//!     CONSTRAINT fk_session_tokens_user
//!         FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE,
//!     INDEX idx_session_tokens_user (user_id),
//!     INDEX idx_session_tokens_last_used (last_used_at)
//! );
//! ```
//!
//! The foreign key gives the cascade invariant: deleting a user deletes all
//! of that user's sessions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sk_core::domain::entities::session_token::SessionToken;
use sk_core::errors::DomainError;
use sk_core::repositories::SessionTokenRepository;

/// MySQL implementation of SessionTokenRepository
pub struct MySqlSessionTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlSessionTokenRepository {
    /// Create a new MySQL session token repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to SessionToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<SessionToken, DomainError> {
        let user_id: String = row.try_get("user_id").map_err(|e| DomainError::Database {
            message: format!("Failed to get user_id: {}", e),
        })?;

        Ok(SessionToken {
            token: row.try_get("token").map_err(|e| DomainError::Database {
                message: format!("Failed to get token: {}", e),
            })?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            last_used_at: row.try_get::<DateTime<Utc>, _>("last_used_at").map_err(|e| {
                DomainError::Database {
                    message: format!("Failed to get last_used_at: {}", e),
                }
            })?,
        })
    }
}

#[async_trait]
impl SessionTokenRepository for MySqlSessionTokenRepository {
    async fn insert(&self, token: SessionToken) -> Result<SessionToken, DomainError> {
        let query = r#"
            INSERT INTO session_tokens (token, user_id, last_used_at)
            VALUES (?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&token.token)
            .bind(token.user_id.to_string())
            .bind(token.last_used_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                // Primary key collision is the uniqueness backstop
                sqlx::Error::Database(db_err)
                    if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
                {
                    DomainError::Validation {
                        message: "Token value already exists".to_string(),
                    }
                }
                _ => DomainError::Database {
                    message: format!("Failed to insert session token: {}", e),
                },
            })?;

        Ok(token)
    }

    async fn find(&self, value: &str) -> Result<Option<SessionToken>, DomainError> {
        let query = r#"
            SELECT token, user_id, last_used_at
            FROM session_tokens
            WHERE token = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to find session token: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn touch(
        &self,
        value: &str,
        now: DateTime<Utc>,
        cutoff: DateTime<Utc>,
    ) -> Result<Option<Uuid>, DomainError> {
        // Single freshness-scoped UPDATE: an expired row never gets
        // resurrected, and two concurrent touches both pass or both fail
        // against the current persisted timestamp.
        let update = r#"
            UPDATE session_tokens
            SET last_used_at = ?
            WHERE token = ? AND last_used_at > ?
        "#;

        sqlx::query(update)
            .bind(now)
            .bind(value)
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to refresh session token: {}", e),
            })?;

        // MySQL reports zero affected rows when the new timestamp equals the
        // stored one, so freshness is re-checked by this select rather than
        // by rows_affected.
        let select = r#"
            SELECT user_id
            FROM session_tokens
            WHERE token = ? AND last_used_at > ?
            LIMIT 1
        "#;

        let row = sqlx::query(select)
            .bind(value)
            .bind(cutoff)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to load session identity: {}", e),
            })?;

        match row {
            Some(row) => {
                let user_id: String = row.try_get("user_id").map_err(|e| DomainError::Database {
                    message: format!("Failed to get user_id: {}", e),
                })?;
                let user_id = Uuid::parse_str(&user_id).map_err(|e| DomainError::Internal {
                    message: format!("Invalid user UUID: {}", e),
                })?;
                Ok(Some(user_id))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, value: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM session_tokens WHERE token = ?")
            .bind(value)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to delete session token: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM session_tokens WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to delete user session tokens: {}", e),
            })?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete_unused_since(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        // Predicate evaluated by the database at delete time; a token
        // refreshed concurrently is not in the matched set.
        let result = sqlx::query("DELETE FROM session_tokens WHERE last_used_at < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to delete expired session tokens: {}", e),
            })?;

        Ok(result.rows_affected() as usize)
    }
}
