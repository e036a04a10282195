//! ============================================================================
//! RELAY-CORE: Signing and Upstream Calls
//! ============================================================================
//! This crate handles all backend logic for the tweet relay:
//! - OAuth 1.0a request signing (base string, HMAC-SHA1, Authorization header)
//! - Credential loading from .env files
//! - Signed Twitter API v2 calls via reqwest
//! ============================================================================

pub mod auth;
pub mod credentials;
pub mod executor;
pub mod types;

// Re-export main types for convenience
pub use types::*;
pub use credentials::Credentials;
pub use executor::{TweetApi, TwitterExecutor};
