//! Error types for the artworks API

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed with status {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("JSON parsing error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Invalid page number: {0}")]
    InvalidPage(u32),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Whether another attempt at the same request could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Timeout(_) => true,
            ApiError::Status { status, .. } => {
                status.is_server_error()
                    || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
                    || *status == reqwest::StatusCode::REQUEST_TIMEOUT
            }
            ApiError::Http(e) => e.is_timeout() || e.is_connect(),
            ApiError::Decode(_) | ApiError::InvalidPage(_) | ApiError::Config(_) => false,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
