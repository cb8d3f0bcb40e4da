//! Repository contracts for persistence of domain entities.

pub mod token;

pub use token::SessionTokenRepository;
