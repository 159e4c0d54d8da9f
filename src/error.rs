//! Error types for wikiscape
//!
//! This module provides the error hierarchy used across the fetcher,
//! extraction and export layers. Only [`FetchError`] and [`ExtractionError`]
//! are expected during a normal crawl; the pipeline logs them and moves on to
//! the next page.

use thiserror::Error;

/// The main error type for wikiscape operations
#[derive(Error, Debug)]
pub enum Error {
    /// Page fetching errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Table/section extraction errors
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writer errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Transport-level failures while retrieving a page
#[derive(Error, Debug)]
pub enum FetchError {
    /// URL could not be parsed or resolved
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Request did not finish within the configured timeout
    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    /// Server answered with a non-2xx status
    #[error("HTTP error {status} for {url}")]
    HttpError {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Connection, DNS or TLS failure
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl FetchError {
    /// Whether this failure came from the network round trip (as opposed to
    /// bad input or local setup).
    pub fn is_transport(&self) -> bool {
        !matches!(self, FetchError::InvalidUrl(_) | FetchError::ClientBuild(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return FetchError::HttpError {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            };
        }
        if err.is_body() || err.is_decode() {
            return FetchError::Body(err.to_string());
        }
        FetchError::Network(err.to_string())
    }
}

/// Structural-absence and parsing errors
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// No table on the page contained the locator text
    #[error("No table containing '{0}' found")]
    TableNotFound(String),

    /// No heading with the exact label was found
    #[error("No section headed '{0}' found")]
    SectionNotFound(String),
}

/// Output errors
#[derive(Error, Debug)]
pub enum ExportError {
    /// Every table was empty
    #[error("Nothing to export")]
    NothingToExport,

    /// Writing an output file failed
    #[error("Failed to write {path}: {message}")]
    WriteFailed {
        /// Target path
        path: String,
        /// Underlying failure
        message: String,
    },
}

/// Result type alias for wikiscape operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a generic error from a string
    pub fn generic<S: Into<String>>(msg: S) -> Self {
        Error::Generic(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Fetch(FetchError::Network("dns failure".to_string()));
        assert!(err.to_string().contains("Network error"));
        assert!(err.to_string().contains("dns failure"));
    }

    #[test]
    fn test_http_error() {
        let err = FetchError::HttpError {
            status: 404,
            url: "https://wiki.walkscape.app/wiki/Nope".to_string(),
        };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("/wiki/Nope"));
    }

    #[test]
    fn test_extraction_error() {
        let err = ExtractionError::TableNotFound("antique market assessor".to_string());
        assert_eq!(
            err.to_string(),
            "No table containing 'antique market assessor' found"
        );
    }

    #[test]
    fn test_transport_classification() {
        assert!(FetchError::Timeout(10_000).is_transport());
        assert!(FetchError::HttpError {
            status: 500,
            url: String::new()
        }
        .is_transport());
        assert!(!FetchError::InvalidUrl("nope".to_string()).is_transport());
        assert!(!FetchError::ClientBuild("tls".to_string()).is_transport());
    }

    #[test]
    fn test_generic_error() {
        let err = Error::generic("something went wrong");
        assert_eq!(err.to_string(), "something went wrong");
    }
}
