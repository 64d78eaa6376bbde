use thiserror::Error;

/// Errors that can occur while talking to the options and validate endpoints
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Invalid response body (status {status}): {message}")]
    Body { status: u16, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Cross-origin request refused: {0}")]
    CrossOrigin(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

impl From<url::ParseError> for TransportError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}
