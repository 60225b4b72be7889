//! Errors returned by the quote API client

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request to the quote API failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Quote API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode quote API response: {0}")]
    Decode(String),

    #[error("Invalid quote API host '{0}'")]
    InvalidUrl(String),
}

impl ApiError {
    /// True for a 404, i.e. an unknown resume token
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}
