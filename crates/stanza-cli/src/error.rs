//! Error types for stanza-cli

use thiserror::Error;

/// Result type alias for stanza-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in stanza-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from stanza-core
    #[error("{0}")]
    Core(#[from] stanza_core::Error),

    /// Error from stanza-client
    #[error("{0}")]
    Client(#[from] stanza_client::Error),

    /// Output could not be encoded as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output could not be written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Core(stanza_core::Error::config(message))
    }
}
