//! Session token policy configuration

use serde::{Deserialize, Serialize};

/// Policy governing bearer session tokens
///
/// A token stays valid while it has been used within the expiry window
/// (sliding expiration). The reaper deletes tokens idle for longer than
/// the window, on the configured sweep cadence.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionPolicy {
    /// Sliding expiry window in days
    pub expiry_window_days: i64,

    /// How often the background reaper runs, in seconds
    pub sweep_interval_seconds: u64,

    /// Length of generated token values in characters
    pub token_length: usize,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            expiry_window_days: 7,
            sweep_interval_seconds: 3600, // Run every hour
            token_length: 32,
        }
    }
}

impl SessionPolicy {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let expiry_window_days = std::env::var("SESSION_EXPIRY_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .unwrap_or(7);
        let sweep_interval_seconds = std::env::var("SESSION_SWEEP_INTERVAL_SECONDS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .unwrap_or(3600);
        let token_length = std::env::var("SESSION_TOKEN_LENGTH")
            .unwrap_or_else(|_| "32".to_string())
            .parse()
            .unwrap_or(32);

        Self {
            expiry_window_days,
            sweep_interval_seconds,
            token_length,
        }
    }

    /// Set the sliding expiry window in days
    pub fn with_expiry_window_days(mut self, days: i64) -> Self {
        self.expiry_window_days = days;
        self
    }

    /// Set the sweep cadence in seconds
    pub fn with_sweep_interval_seconds(mut self, seconds: u64) -> Self {
        self.sweep_interval_seconds = seconds;
        self
    }
}
