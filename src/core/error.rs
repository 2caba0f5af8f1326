//! Error types for the page-loader library
//!
//! Every failure is fatal to the run that produced it; nothing here is
//! retried or partially recovered.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Main error type for page-loader operations
#[derive(Debug)]
pub enum Error {
    /// Connection-level failure fetching the page or an asset
    NetworkError(String),

    /// Non-2xx response from the server
    HttpStatusError {
        /// The URL that produced the response
        url: String,
        /// The HTTP status code
        status: u16,
    },

    /// Destination missing, not a directory, or any filesystem failure
    /// during commit
    StorageError {
        /// The path the operation was applied to
        path: PathBuf,
        /// The underlying OS-level cause
        source: io::Error,
    },

    /// The page URL could not be parsed
    InvalidUrl(url::ParseError),
}

impl Error {
    /// Wraps an I/O error with the path it happened at.
    pub fn storage(path: &Path, source: io::Error) -> Self {
        Error::StorageError {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NetworkError(msg) => {
                write!(f, "Network error: {}", msg)
            }
            Error::HttpStatusError { url, status } => {
                write!(f, "'{}' responded with status {}", url, status)
            }
            Error::StorageError { path, source } => {
                write!(f, "Storage error at '{}': {}", path.display(), source)
            }
            Error::InvalidUrl(err) => {
                write!(f, "Invalid URL: {}", err)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::StorageError { source, .. } => Some(source),
            Error::InvalidUrl(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Error::HttpStatusError {
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
                status: status.as_u16(),
            },
            None => Error::NetworkError(err.to_string()),
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::InvalidUrl(err)
    }
}

/// Convenience result type for page-loader operations
pub type Result<T> = std::result::Result<T, Error>;
