//! Session token repository trait defining the interface for token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::session_token::SessionToken;
use crate::errors::DomainError;

/// Repository trait for SessionToken entity persistence operations
///
/// This trait is the Token Store contract: it exclusively owns session token
/// records, and every other component goes through these operations. The
/// freshness predicate is always `last_used_at > cutoff` — the boundary is
/// exclusive.
#[async_trait]
pub trait SessionTokenRepository: Send + Sync {
    /// Persist a new session token
    ///
    /// # Arguments
    /// * `token` - The SessionToken entity to persist
    ///
    /// # Returns
    /// * `Ok(SessionToken)` - The saved token
    /// * `Err(DomainError::Validation)` - A token with the same value already
    ///   exists (storage-level uniqueness backstop; the random space makes
    ///   this effectively impossible in practice)
    /// * `Err(DomainError::Database)` - Storage failure
    async fn insert(&self, token: SessionToken) -> Result<SessionToken, DomainError>;

    /// Find a session token by its opaque value
    ///
    /// # Returns
    /// * `Ok(Some(SessionToken))` - Token found, regardless of freshness
    /// * `Ok(None)` - No token with that value
    /// * `Err(DomainError)` - Storage failure
    async fn find(&self, value: &str) -> Result<Option<SessionToken>, DomainError>;

    /// Atomically refresh the last-used timestamp of a live token
    ///
    /// Updates `last_used_at` to `now` for the row whose value matches AND
    /// whose `last_used_at` is strictly after `cutoff`, in a single storage
    /// operation — implementations must not read-then-save, so that two
    /// concurrent verifications of the same token cannot lose the freshness
    /// check.
    ///
    /// # Arguments
    /// * `value` - The presented token value
    /// * `now` - The new last-used instant
    /// * `cutoff` - Expiry cutoff; rows at or before it do not match
    ///
    /// # Returns
    /// * `Ok(Some(user_id))` - Token was live; timestamp refreshed
    /// * `Ok(None)` - Token absent or idle-expired; nothing changed
    /// * `Err(DomainError)` - Storage failure
    async fn touch(
        &self,
        value: &str,
        now: DateTime<Utc>,
        cutoff: DateTime<Utc>,
    ) -> Result<Option<Uuid>, DomainError>;

    /// Delete a single session token
    ///
    /// # Returns
    /// * `Ok(true)` - Token existed and was deleted
    /// * `Ok(false)` - No such token (callers treat this as a no-op)
    /// * `Err(DomainError)` - Storage failure
    async fn delete(&self, value: &str) -> Result<bool, DomainError>;

    /// Delete every session token owned by a user
    ///
    /// Used when credentials change, forcing re-authentication everywhere.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens deleted
    /// * `Err(DomainError)` - Storage failure
    async fn delete_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Delete every token whose last use is strictly before `cutoff`
    ///
    /// Implementations must evaluate the predicate against current storage
    /// state in one scoped delete, never against a precomputed id list, so a
    /// token refreshed concurrently with the sweep survives.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of tokens deleted (zero is a safe no-op)
    /// * `Err(DomainError)` - Storage failure
    async fn delete_unused_since(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError>;
}
