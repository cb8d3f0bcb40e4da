//! Shared configuration types for SessKeep server crates
//!
//! This crate provides the configuration surface used across all server
//! modules:
//! - Database connection and pool configuration
//! - Session token policy (expiry window, sweep cadence, token length)
//! - Environment detection

pub mod config;

// Re-export commonly used items at crate root
pub use config::{AppConfig, DatabaseConfig, Environment, SessionPolicy};
