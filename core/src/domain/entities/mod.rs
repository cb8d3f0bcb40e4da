//! Domain entities representing core business objects.

pub mod session_token;

// Re-export commonly used types
pub use session_token::{SessionToken, DEFAULT_EXPIRY_WINDOW_DAYS, DEFAULT_TOKEN_LENGTH};
