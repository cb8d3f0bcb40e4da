//! Session token entity for opaque bearer authentication.
//!
//! The token value carries no internal structure: validity is decided by
//! looking the row up in storage, which keeps revocation instant. This is a
//! deliberate alternative to self-verifying signed tokens, which cannot be
//! revoked server-side without an extra blocklist.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sliding expiry window (7 days)
pub const DEFAULT_EXPIRY_WINDOW_DAYS: i64 = 7;

/// Length of generated token values
pub const DEFAULT_TOKEN_LENGTH: usize = 32;

/// Opaque bearer session token stored in the database
///
/// A user may hold many tokens at once (one per signed-in device). The
/// `last_used_at` timestamp is refreshed on every successful verification,
/// so active sessions never expire while idle ones age out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    /// Opaque random value presented by clients as the bearer credential
    pub token: String,

    /// User this session belongs to
    pub user_id: Uuid,

    /// Timestamp of issuance or the last successful verification
    pub last_used_at: DateTime<Utc>,
}

impl SessionToken {
    /// Creates a new session token for a user, marked as used now
    pub fn new(user_id: Uuid, token: String) -> Self {
        Self {
            token,
            user_id,
            last_used_at: Utc::now(),
        }
    }

    /// Whether the token is still live against the given cutoff instant
    ///
    /// The boundary is exclusive: a token last used exactly at the cutoff
    /// is expired.
    pub fn is_live(&self, cutoff: DateTime<Utc>) -> bool {
        self.last_used_at > cutoff
    }

    /// Refreshes the last-used timestamp
    ///
    /// `last_used_at` is monotonically non-decreasing: a refresh with an
    /// earlier instant is ignored.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.last_used_at {
            self.last_used_at = now;
        }
    }

    /// Cutoff instant for a sliding window measured back from `now`
    pub fn expiry_cutoff(now: DateTime<Utc>, window: Duration) -> DateTime<Utc> {
        now - window
    }
}
