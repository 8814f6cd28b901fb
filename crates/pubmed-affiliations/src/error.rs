//! Error types for the PubMed affiliation pipeline.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::path::PathBuf;
use std::time::Duration;

use crate::models::PaperRecord;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configured base URL cannot be parsed
    #[error("Invalid E-utilities URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Rate limited by NCBI (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from the service
        message: String,
    },

    /// ESearch answered 200 but reported an error in its body
    #[error("Search rejected by PubMed: {message}")]
    Search {
        /// Error text reported by ESearch
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a search error.
    #[must_use]
    pub fn search(message: impl Into<String>) -> Self {
        Self::Search { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }
}

/// Errors raised while reading an EFetch XML document.
#[derive(thiserror::Error, Debug)]
pub enum DocumentError {
    /// Syntax or encoding problem reported by the XML reader
    #[error("XML error at byte {position}: {source}")]
    Xml {
        /// Byte offset where the reader stopped
        position: u64,
        /// Underlying reader error
        #[source]
        source: quick_xml::Error,
    },

    /// Document ended while an element was still open
    #[error("document ended inside <{element}>")]
    Truncated {
        /// Name of the innermost open element
        element: String,
    },
}

/// A document error together with the records parsed before it.
#[derive(thiserror::Error, Debug)]
#[error("malformed PubMed document after {} complete record(s): {source}", .recovered.len())]
pub struct PartialParse {
    /// Records whose `</PubmedArticle>` was reached before the error.
    pub recovered: Vec<PaperRecord>,

    /// What went wrong.
    #[source]
    pub source: DocumentError,
}

/// Errors from writing results.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// File could not be created or written
    #[error("Error writing to CSV file {}: {source}", .path.display())]
    Io {
        /// Target file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// CSV encoder failure
    #[error("Error writing to CSV file {}: {source}", .path.display())]
    Csv {
        /// Target file
        path: PathBuf,
        /// Underlying CSV error
        #[source]
        source: csv::Error,
    },
}

impl ExportError {
    /// The file the failed write was aimed at.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Csv { path, .. } => path,
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
