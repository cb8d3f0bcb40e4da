//! Database connection pool management
//!
//! This module provides database connection pooling using SQLx with MySQL:
//! pool sizing, timeouts, and health checks driven by the shared
//! `DatabaseConfig`.

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    MySqlPool,
};
use std::str::FromStr;
use std::time::Duration;

use sk_shared::DatabaseConfig;

use crate::InfrastructureError;

/// Database connection pool wrapper
///
/// Manages the MySQL connection pool with configurable settings for
/// connection limits and timeouts.
#[derive(Clone)]
pub struct DatabasePool {
    /// SQLx MySQL connection pool
    pool: MySqlPool,
}

impl DatabasePool {
    /// Create a new database connection pool
    ///
    /// # Arguments
    /// * `config` - Database configuration settings
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Database pool or error
    pub async fn new(config: DatabaseConfig) -> Result<Self, InfrastructureError> {
        tracing::info!(
            "Creating database connection pool with max_connections: {}",
            config.max_connections
        );

        let connect_options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?;

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create database pool: {}", e);
                InfrastructureError::Database(e)
            })?;

        tracing::info!("Database connection pool created successfully");

        Ok(Self { pool })
    }

    /// Get a reference to the underlying connection pool
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Check database connectivity
    pub async fn health_check(&self) -> Result<(), InfrastructureError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(InfrastructureError::Database)?;
        Ok(())
    }

    /// Close all connections in the pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
