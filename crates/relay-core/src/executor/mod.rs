//! ============================================================================
//! Executor Module - Upstream API Executors
//! ============================================================================
//! - TweetApi: the two upstream calls the relay performs
//! - TwitterExecutor: OAuth 1.0a signed implementation over Twitter API v2
//! ============================================================================

use async_trait::async_trait;

use crate::types::{RelayError, UpstreamResponse};

mod twitter;

pub use twitter::{is_valid_tweet_id, TwitterExecutor, DEFAULT_TIMEOUT, TWITTER_API_BASE};

/// Upstream tweet operations; the HTTP layer only sees this trait
#[async_trait]
pub trait TweetApi: Send + Sync {
    /// Create a tweet with the given text
    async fn post_tweet(&self, text: &str) -> Result<UpstreamResponse, RelayError>;

    /// Delete the tweet with the given ID
    async fn delete_tweet(&self, tweet_id: &str) -> Result<UpstreamResponse, RelayError>;
}
