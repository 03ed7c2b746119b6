//! Custom error types for scholarstreak.
//!
//! This module defines all error types used throughout the application.
//! All functions return `Result<T, CollectorError>` instead of using `unwrap()`.

use thiserror::Error;

/// Main error type for scholarstreak operations.
///
/// Uses `thiserror` for ergonomic error handling and automatic `Display` implementation.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Network/HTTP request error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Rate limited by external API
    #[error("Rate limited, retry after {0}s")]
    RateLimited(u64),

    /// External API returned an error
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code from API
        code: i32,
        /// Error message from API
        message: String,
    },

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias using `CollectorError`
pub type Result<T> = std::result::Result<T, CollectorError>;
