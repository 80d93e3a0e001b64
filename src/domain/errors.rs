//! Domain error types
//!
//! This module defines the error hierarchy for Hearth. Errors carry plain
//! strings and status codes so that transport and filesystem crates never leak
//! through the public API.

use thiserror::Error;

/// Main Hearth error type
///
/// Fetch-phase failures (`Transport`, `HttpStatus`, `Decode`) are retried by the
/// pipeline. Download-phase failures are terminal for a single record only.
#[derive(Debug, Error)]
pub enum HearthError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network or connection failure reported by the transport
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// Payload could not be decoded into the page schema
    #[error("Decode error: {0}")]
    Decode(String),

    /// A record cannot be turned into an output filename
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Directory, file creation or write failure
    #[error("Filesystem error: {0}")]
    Filesystem(String),

    /// A page kept failing until the configured retry bound was reached
    #[error("Page {page} failed after {attempts} attempts: {last_error}")]
    PageExhausted {
        page: u32,
        attempts: usize,
        last_error: String,
    },

    /// The run was interrupted by a shutdown signal
    #[error("Operation cancelled by shutdown signal")]
    Cancelled,

    /// I/O errors outside the storage boundary
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl HearthError {
    /// Failures the fetch loop retries
    ///
    /// Everything a page fetch can report over the wire is retryable. Any other
    /// error ends the loop at once.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            HearthError::Transport(_) | HearthError::HttpStatus { .. } | HearthError::Decode(_)
        )
    }

    /// Coarse classification used by the run summary
    pub fn kind(&self) -> ErrorKind {
        match self {
            HearthError::Transport(_) | HearthError::HttpStatus { .. } => ErrorKind::Transport,
            HearthError::Decode(_) => ErrorKind::Decode,
            HearthError::InvalidInput(_) => ErrorKind::InvalidInput,
            HearthError::Filesystem(_) | HearthError::Io(_) => ErrorKind::Filesystem,
            HearthError::Cancelled => ErrorKind::Cancelled,
            HearthError::Configuration(_)
            | HearthError::PageExhausted { .. }
            | HearthError::Other(_) => ErrorKind::Other,
        }
    }
}

/// Error classes reported per record in the run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure or non-success status
    Transport,
    /// Malformed payload
    Decode,
    /// Record could not be named
    InvalidInput,
    /// Directory or file failure
    Filesystem,
    /// Interrupted before completion
    Cancelled,
    /// Anything else
    Other,
}

impl ErrorKind {
    /// Whether the failure belongs to the storage class
    ///
    /// Naming failures mean the output cannot be written, so they count as
    /// storage failures when grouping.
    pub fn is_storage_class(&self) -> bool {
        matches!(self, ErrorKind::InvalidInput | ErrorKind::Filesystem)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Decode => "decode",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Filesystem => "filesystem",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Other => "other",
        };
        f.write_str(name)
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for HearthError {
    fn from(err: std::io::Error) -> Self {
        HearthError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for HearthError {
    fn from(err: serde_json::Error) -> Self {
        HearthError::Decode(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for HearthError {
    fn from(err: toml::de::Error) -> Self {
        HearthError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hearth_error_display() {
        let err = HearthError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_http_status_display() {
        let err = HearthError::HttpStatus {
            status: 404,
            url: "http://example.com/houses?page=3".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP status 404 from http://example.com/houses?page=3"
        );
    }

    #[test]
    fn test_fetch_errors_are_retryable() {
        assert!(HearthError::Transport("reset".to_string()).is_retryable());
        assert!(HearthError::Decode("bad json".to_string()).is_retryable());
        assert!(HearthError::HttpStatus {
            status: 503,
            url: String::new()
        }
        .is_retryable());
        assert!(!HearthError::Cancelled.is_retryable());
        assert!(!HearthError::Configuration("bad url".to_string()).is_retryable());
        assert!(!HearthError::Filesystem("disk full".to_string()).is_retryable());
    }

    #[test]
    fn test_error_kind_classification() {
        assert_eq!(
            HearthError::InvalidInput("no extension".to_string()).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            HearthError::HttpStatus {
                status: 500,
                url: String::new()
            }
            .kind(),
            ErrorKind::Transport
        );
        assert!(ErrorKind::InvalidInput.is_storage_class());
        assert!(ErrorKind::Filesystem.is_storage_class());
        assert!(!ErrorKind::Transport.is_storage_class());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: HearthError = io_err.into();
        assert!(matches!(err, HearthError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: HearthError = json_err.into();
        assert!(matches!(err, HearthError::Decode(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: HearthError = toml_err.into();
        assert!(matches!(err, HearthError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_hearth_error_implements_std_error() {
        let err = HearthError::Cancelled;
        let _: &dyn std::error::Error = &err;
    }
}
