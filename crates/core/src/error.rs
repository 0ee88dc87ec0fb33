//! Error types for the state-log explorer.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the state-log explorer.
///
/// Only the load boundary and configuration produce errors. Extraction never
/// fails: missing or malformed fields degrade to empty collections or
/// fallback values.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data error (document present but unusable).
    #[error("Data error: {0}")]
    Data(String),

    /// The uploaded content is not valid JSON.
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The uploaded content could not be read.
    #[error("Read error: {0}")]
    Read(#[from] std::io::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a data error.
    pub fn data(msg: impl Into<String>) -> Self {
        Error::Data(msg.into())
    }
}
