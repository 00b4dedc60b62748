//! Error types for store interactions.

use thiserror::Error;

/// Errors returned by a [`crate::SearchStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// The request never produced a response (connection refused, reset, timeout).
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The store answered with a non-success status.
    #[error("Store returned status {status} for {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error while building a request body.
    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    /// Status code of a rejected request, if the store answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
