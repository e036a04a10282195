//! ============================================================================
//! Twitter Executor - Tweet Posting/Deletion via Twitter API v2
//! ============================================================================
//! Every call is signed with OAuth 1.0a user-context credentials:
//! - Post a tweet
//! - Delete a tweet by ID
//! ============================================================================

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use tracing::{debug, info, warn};

use super::TweetApi;
use crate::auth::build_auth_header;
use crate::credentials::Credentials;
use crate::types::{CreateTweetBody, RelayError, UpstreamResponse};

/// Twitter API v2 base URL
pub const TWITTER_API_BASE: &str = "https://api.twitter.com/2";

/// Default timeout for a single upstream call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Executor for Twitter posting operations
pub struct TwitterExecutor {
    client: reqwest::Client,
    api_base: String,
    credentials: Arc<Credentials>,
}

impl TwitterExecutor {
    /// Create a new TwitterExecutor against the given API base URL
    pub fn new(
        credentials: Arc<Credentials>,
        api_base: &str,
        timeout: Duration,
    ) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("tweet-relay/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RelayError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Sign and send one request, returning the upstream status and body
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&CreateTweetBody>,
    ) -> Result<UpstreamResponse, RelayError> {
        let auth_header = build_auth_header(method.as_str(), url, &self.credentials);

        let mut builder = self
            .client
            .request(method.clone(), url)
            .header(AUTHORIZATION, auth_header)
            .header(CONTENT_TYPE, "application/json");

        if let Some(body) = body {
            builder = builder.json(body);
        }

        let request = builder
            .build()
            .map_err(|e| RelayError::RequestBuild(e.to_string()))?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| RelayError::ResponseRead(e.to_string()))?;

        if status.is_success() {
            debug!("{} {} -> {}", method, url, status);
        } else {
            warn!("Twitter API returned {} for {} {}", status, method, url);
        }

        Ok(UpstreamResponse {
            status: status.as_u16(),
            body: body.to_vec(),
        })
    }
}

#[async_trait]
impl TweetApi for TwitterExecutor {
    async fn post_tweet(&self, text: &str) -> Result<UpstreamResponse, RelayError> {
        info!(
            "Posting tweet: {}...",
            text.chars().take(50).collect::<String>()
        );

        let url = format!("{}/tweets", self.api_base);
        let body = CreateTweetBody {
            text: text.to_string(),
        };

        self.send(Method::POST, &url, Some(&body)).await
    }

    async fn delete_tweet(&self, tweet_id: &str) -> Result<UpstreamResponse, RelayError> {
        if !is_valid_tweet_id(tweet_id) {
            return Err(RelayError::RequestBuild(format!(
                "Invalid tweet id: {:?}",
                tweet_id
            )));
        }

        info!("Deleting tweet {}", tweet_id);

        let url = format!("{}/tweets/{}", self.api_base, tweet_id);
        self.send(Method::DELETE, &url, None).await
    }
}

/// Tweet IDs are decimal snowflakes; anything else would alter the upstream path
pub fn is_valid_tweet_id(tweet_id: &str) -> bool {
    !tweet_id.is_empty() && tweet_id.bytes().all(|b| b.is_ascii_digit())
}
