//! Error types for stanza-client

use thiserror::Error;

/// Result type alias for stanza-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in stanza-client
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from stanza-core
    #[error("Core error: {0}")]
    Core(#[from] stanza_core::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Listing response did not have the expected shape
    #[error("Malformed listing response from {url}: {source}")]
    MalformedListing {
        /// Listing URL that answered
        url: String,
        /// Decoding failure
        #[source]
        source: serde_json::Error,
    },

    /// Config file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be serialized
    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Returns `true` for a clean "does not exist" answer from the remote.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Core(e) if e.is_not_found())
    }

    /// Returns `true` when no response was received at all.
    pub fn is_transport(&self) -> bool {
        match self {
            Error::Core(e) => e.is_transport(),
            Error::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }
}
