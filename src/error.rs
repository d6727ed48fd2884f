//! Error types for the search library.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Malformed proxy or client configuration, raised at construction.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Connection or timeout failure during a fetch.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status outside the blocking set.
    #[error("HTTP status {0}")]
    Status(u16),

    /// Expected page structure was missing.
    #[error("failed to parse page: {0}")]
    Parse(String),

    /// Invalid query.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Statuses indicating the engine is refusing service rather than failing.
pub fn is_blocking_status(status: u16) -> bool {
    matches!(status, 403 | 429 | 503)
}
