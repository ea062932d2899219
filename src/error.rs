use thiserror::Error;

/// Errors that can occur while talking to the recipe database
#[derive(Error, Debug)]
pub enum ExplorerError {
    /// Failed to reach the remote API
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The remote API answered with a non-success status
    #[error("Unexpected HTTP status: {0}")]
    StatusError(u16),

    /// Response body was not the expected JSON shape
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Gateway builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
