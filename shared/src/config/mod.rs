//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection
//! - `session` - Session token policy (expiry window, sweep cadence)

pub mod database;
pub mod environment;
pub mod session;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use session::SessionPolicy;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Session token policy
    #[serde(default)]
    pub session: SessionPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            database: DatabaseConfig::default(),
            session: SessionPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig::new("mysql://localhost:3306/sesskeep_dev"),
            session: SessionPolicy::default(),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig::from_env().with_max_connections(50),
            session: SessionPolicy::from_env(),
        }
    }

    /// Load configuration from environment
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        Self {
            environment: env,
            database: DatabaseConfig::from_env(),
            session: SessionPolicy::from_env(),
        }
    }
}
