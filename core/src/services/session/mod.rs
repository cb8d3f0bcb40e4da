//! Session service module for opaque bearer token management
//!
//! This module handles all session-related operations:
//! - Token issuance at login
//! - Token verification with sliding expiration
//! - Token revocation (logout, credential change)
//! - Background reaping of idle-expired tokens

mod config;
mod reaper;
mod service;

#[cfg(test)]
mod tests;

pub use config::SessionServiceConfig;
pub use reaper::{ReaperConfig, ReaperHandle, SessionReaper};
pub use service::SessionService;
