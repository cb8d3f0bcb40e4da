//! Session lifecycle service: issuance, verification, and revocation
//!
//! The service is the only entry point for token state transitions. The
//! surrounding HTTP layer extracts the bearer credential from the
//! `Authorization` header and hands it to [`SessionService::verify`] before
//! route handling; login calls [`SessionService::issue`], logout calls
//! [`SessionService::revoke`], and a completed password reset calls
//! [`SessionService::revoke_all`].

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::session_token::SessionToken;
use crate::errors::DomainError;
use crate::repositories::SessionTokenRepository;

use super::config::SessionServiceConfig;

/// Service managing the opaque bearer session lifecycle
pub struct SessionService<R: SessionTokenRepository> {
    repository: Arc<R>,
    config: SessionServiceConfig,
}

impl<R: SessionTokenRepository> SessionService<R> {
    /// Create a new session service
    pub fn new(repository: Arc<R>, config: SessionServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Issue a new session token for an already-authenticated user
    ///
    /// Generates a random opaque value, persists it with `last_used_at` set
    /// to now, and returns the raw value for delivery to the client. There
    /// is no collision retry: the random space makes collisions effectively
    /// impossible, and the repository's uniqueness constraint is the
    /// backstop.
    ///
    /// # Returns
    /// * `Ok(String)` - The bearer credential to hand to the client
    /// * `Err(DomainError)` - Storage failure
    pub async fn issue(&self, user_id: Uuid) -> Result<String, DomainError> {
        let value = generate_token_value(self.config.token_length);

        let token = SessionToken::new(user_id, value.clone());
        self.repository.insert(token).await?;

        debug!(%user_id, "issued session token");
        Ok(value)
    }

    /// Verify a presented bearer token
    ///
    /// Looks the token up scoped by the expiry window and refreshes its
    /// `last_used_at` in the same storage operation (sliding expiration).
    /// The refresh happens on every successful verification, including for
    /// routes that do not themselves require authentication: any
    /// authenticated traffic counts as session activity.
    ///
    /// # Returns
    /// * `Ok(Some(user_id))` - Valid token; the caller's identity
    /// * `Ok(None)` - Absent or idle-expired token. Not an error: the caller
    ///   treats the request as unauthenticated and decides whether the route
    ///   requires an identity
    /// * `Err(DomainError)` - Storage failure
    pub async fn verify(&self, value: &str) -> Result<Option<Uuid>, DomainError> {
        let now = Utc::now();
        let cutoff = now - self.config.expiry_window;

        self.repository.touch(value, now, cutoff).await
    }

    /// Revoke a single session token (logout)
    ///
    /// Revoking a token that does not exist is a no-op, not an error.
    pub async fn revoke(&self, value: &str) -> Result<(), DomainError> {
        let deleted = self.repository.delete(value).await?;
        if deleted {
            debug!("revoked session token");
        }
        Ok(())
    }

    /// Revoke every session token owned by a user
    ///
    /// Called when credentials change (password reset), forcing re-login on
    /// all devices.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of sessions revoked
    pub async fn revoke_all(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let revoked = self.repository.delete_all_for_user(user_id).await?;
        debug!(%user_id, revoked, "revoked all user sessions");
        Ok(revoked)
    }
}

/// Generate a random token value over `[0-9a-zA-Z]`
///
/// `thread_rng` is an OS-seeded CSPRNG, so values are unpredictable.
fn generate_token_value(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..62);
            match idx {
                0..10 => (b'0' + idx) as char,
                10..36 => (b'a' + idx - 10) as char,
                36..62 => (b'A' + idx - 36) as char,
                _ => unreachable!(),
            }
        })
        .collect()
}
