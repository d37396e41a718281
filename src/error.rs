//! Error types for the bidwatch library.
//!
//! The matcher itself is total and never fails. Errors only come from the
//! edges: loading notices, validating criteria built from user input and
//! reading configuration. All of them are represented by [`BidwatchError`].
//!
//! # Examples
//!
//! ```
//! use bidwatch::error::{BidwatchError, Result};
//!
//! fn check_year(year: &str) -> Result<()> {
//!     if year.len() != 4 {
//!         return Err(BidwatchError::invalid_criteria("year must have 4 digits"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_year("25").is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for bidwatch operations.
#[derive(Error, Debug)]
pub enum BidwatchError {
    /// I/O errors (reading notice or config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed input data (e.g. a bad JSONL line)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Search criteria that break the ingestion contract
    #[error("Invalid criteria: {0}")]
    InvalidCriteria(String),

    /// Notice records that break the ingestion contract
    #[error("Invalid notice: {0}")]
    InvalidNotice(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias for operations that may fail with BidwatchError.
pub type Result<T> = std::result::Result<T, BidwatchError>;

impl BidwatchError {
    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        BidwatchError::Parse(msg.into())
    }

    /// Create a new invalid criteria error.
    pub fn invalid_criteria<S: Into<String>>(msg: S) -> Self {
        BidwatchError::InvalidCriteria(msg.into())
    }

    /// Create a new invalid notice error.
    pub fn invalid_notice<S: Into<String>>(msg: S) -> Self {
        BidwatchError::InvalidNotice(msg.into())
    }

    /// Create a new config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        BidwatchError::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = BidwatchError::invalid_criteria("bad month");
        assert_eq!(error.to_string(), "Invalid criteria: bad month");

        let error = BidwatchError::invalid_notice("no grades");
        assert_eq!(error.to_string(), "Invalid notice: no grades");

        let error = BidwatchError::parse("line 3");
        assert_eq!(error.to_string(), "Parse error: line 3");

        let error = BidwatchError::config("missing file");
        assert_eq!(error.to_string(), "Config error: missing file");
    }

    #[test]
    fn test_error_from_io() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = BidwatchError::from(io_error);

        match error {
            BidwatchError::Io(_) => {} // Expected
            _ => panic!("Expected IO error"),
        }
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = BidwatchError::from(json_error);
        assert!(matches!(error, BidwatchError::Json(_)));
    }
}
