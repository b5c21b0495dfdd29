//! Error types for stanza-core.
//!
//! These errors never escape the public pipeline API: discovery, fetching and
//! asset probing absorb them into log events and fallbacks. They exist so the
//! internal steps can use `?` and so the CLI can report configuration
//! problems.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for stanza-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the Stanza pipeline.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O error without path context.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error on a specific path.
    #[error("I/O error on {path}: {source}")]
    IoWithPath {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic.
        message: String,
    },

    /// Content or response could not be parsed.
    #[error("Parse error: {message}")]
    Parse {
        /// What failed to parse.
        message: String,
    },

    /// The remote answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The request never produced a response (connect, DNS, timeout, TLS).
    #[error("Transport error for {url}: {message}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Underlying failure.
        message: String,
    },

    /// A URL could not be constructed.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl {
        /// The offending input.
        url: String,
        /// Why it was rejected.
        message: String,
    },
}

impl Error {
    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Error::Parse {
            message: message.into(),
        }
    }

    /// Creates an I/O error carrying the path it happened on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http(status: u16, url: impl Into<String>) -> Self {
        Error::Http {
            status,
            url: url.into(),
        }
    }

    /// Creates a transport error.
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidUrl {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Returns `true` for a clean "does not exist" answer from the remote.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Http { status: 404, .. })
    }

    /// Returns `true` when no response was received at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }
}
