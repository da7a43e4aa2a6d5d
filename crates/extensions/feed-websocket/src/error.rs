//! Feed error types.

use std::time::Duration;

use majsoul_rpa_protocols::RpaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to connect to {url}: {message}")]
    ConnectFailed { url: String, message: String },

    #[error("Connecting to {url} timed out after {timeout:?}")]
    ConnectTimeout { url: String, timeout: Duration },

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    #[error("Malformed event: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<tokio_tungstenite::tungstenite::Error> for FeedError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        FeedError::WebSocket(e.to_string())
    }
}

impl From<FeedError> for RpaError {
    fn from(e: FeedError) -> Self {
        RpaError::EventSource(e.to_string())
    }
}
