//! Domain-specific error types and error handling.
//!
//! A token that is absent or idle-expired is NOT an error: verification
//! reports it as `Ok(None)` so callers can treat the request as
//! unauthenticated and carry on. Errors here cover storage and invariant
//! failures only.

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type DomainResult<T> = Result<T, DomainError>;
