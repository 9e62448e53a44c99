//! Error handling for activity-logger
//!
//! The formatting core never fails; these errors belong to the request
//! adapters and to the configuration layer.

use thiserror::Error;

/// Main error type for activity-logger operations
#[derive(Error, Debug)]
pub enum ActivityLoggerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Response status code was unacceptable: {0}")]
    Status(u16),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for activity-logger operations
pub type Result<T> = std::result::Result<T, ActivityLoggerError>;
