//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the SessKeep backend.
//! It provides the MySQL-backed implementation of the core session token
//! repository contract, plus connection pool management.

use thiserror::Error;

/// Database module - MySQL implementations using SQLx
pub mod database;

pub use database::{DatabasePool, MySqlSessionTokenRepository};

/// Errors raised while constructing infrastructure services
#[derive(Debug, Error)]
pub enum InfrastructureError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
