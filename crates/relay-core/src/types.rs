//! ============================================================================
//! Core Types for the Tweet Relay
//! ============================================================================
//! Payloads exchanged with relay clients and the upstream API, plus the
//! error taxonomy for everything around the signing core.
//! ============================================================================

use serde::{Deserialize, Serialize};

/// Inbound body for `POST /tweet`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweetRequest {
    pub message: String,
}

/// Outbound body for the upstream create-tweet call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTweetBody {
    pub text: String,
}

/// Upstream status and body, relayed to the caller as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Error types for the relay
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to build request: {0}")]
    RequestBuild(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to read response: {0}")]
    ResponseRead(String),
}

impl RelayError {
    /// Errors raised after the request left the process
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::ResponseRead(_))
    }
}
