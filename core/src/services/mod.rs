//! Business services containing domain logic and use cases.

pub mod session;

// Re-export commonly used types
pub use session::{
    ReaperConfig, ReaperHandle, SessionReaper, SessionService, SessionServiceConfig,
};
