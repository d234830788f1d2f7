//! Metadata sources: the Moonraker HTTP client and an in-memory stand-in.

use serde_json::Value;
use thiserror::Error;

pub mod moonraker;
pub mod static_source;

/// Longest body excerpt carried by a [`FetchError::Decode`], in characters.
pub const MAX_SNIPPET_CHARS: usize = 2000;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Connection error: {0}")]
    Connectivity(String),
    #[error("HTTP error: {code} {reason}")]
    HttpStatus { code: u16, reason: String },
    #[error("response was not valid JSON: {message}. Partial body: {snippet:?}")]
    Decode { message: String, snippet: String },
}

impl FetchError {
    /// Builds a decode error from a parse failure and the raw body, truncating the body.
    pub fn decode(err: &serde_json::Error, body: &str) -> Self {
        FetchError::Decode {
            message: err.to_string(),
            snippet: snippet(body),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FetchError::Connectivity(_) | FetchError::HttpStatus { .. }
        )
    }
}

pub fn snippet(body: &str) -> String {
    body.chars().take(MAX_SNIPPET_CHARS).collect()
}

/// Anything that can produce the raw gcode metadata payload.
#[async_trait::async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch(&self) -> Result<Value, FetchError>;

    /// Human-readable origin for logs.
    fn describe(&self) -> String;
}
