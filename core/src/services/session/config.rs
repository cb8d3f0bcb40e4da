//! Configuration for the session service

use chrono::Duration;
use sk_shared::SessionPolicy;

use crate::domain::entities::session_token::{DEFAULT_EXPIRY_WINDOW_DAYS, DEFAULT_TOKEN_LENGTH};

/// Configuration for the session service
#[derive(Debug, Clone)]
pub struct SessionServiceConfig {
    /// Sliding expiry window measured from the last successful verification
    pub expiry_window: Duration,
    /// Length of generated token values in characters
    pub token_length: usize,
}

impl Default for SessionServiceConfig {
    fn default() -> Self {
        Self {
            expiry_window: Duration::days(DEFAULT_EXPIRY_WINDOW_DAYS),
            token_length: DEFAULT_TOKEN_LENGTH,
        }
    }
}

impl From<&SessionPolicy> for SessionServiceConfig {
    fn from(policy: &SessionPolicy) -> Self {
        Self {
            expiry_window: Duration::days(policy.expiry_window_days),
            token_length: policy.token_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::session::ReaperConfig;

    #[test]
    fn test_config_from_policy() {
        let policy = SessionPolicy::default().with_expiry_window_days(14);

        let service_config = SessionServiceConfig::from(&policy);
        assert_eq!(service_config.expiry_window, Duration::days(14));
        assert_eq!(service_config.token_length, 32);

        let reaper_config = ReaperConfig::from(&policy);
        assert_eq!(reaper_config.expiry_window, Duration::days(14));
        assert_eq!(reaper_config.interval_seconds, 3600);
        assert!(reaper_config.enabled);
    }
}
