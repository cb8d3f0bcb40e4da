//! # SessKeep Core
//!
//! Core session lifecycle logic for the SessKeep backend. This crate
//! contains the session token entity, the repository contract for token
//! persistence, the session service (issue, verify, revoke), the background
//! reaper for idle-expired tokens, and the domain error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
