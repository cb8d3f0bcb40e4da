//! MySQL repository implementations

mod session_token_repository_impl;

pub use session_token_repository_impl::MySqlSessionTokenRepository;
