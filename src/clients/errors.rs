use thiserror::Error;

/// Failure taxonomy for catalog lookups.
#[derive(Error, Debug)]
pub enum Error {
    /// DNS, connection, timeout, or a non-2xx status from the catalog
    #[error("Transport error: {0}")]
    TransportError(String),

    /// Body was not JSON, or not the shape the catalog returns
    #[error("Failed to parse catalog response: {0}")]
    ParseError(String),

    /// Invalid request inputs or client construction failure
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::ParseError(err.to_string())
        } else {
            Error::TransportError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ParseError(err.to_string())
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;
