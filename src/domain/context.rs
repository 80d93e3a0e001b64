//! Error context extension trait
//!
//! Similar to `anyhow::Context`, but the error class survives: context is
//! prefixed onto the message of the original [`HearthError`] variant so the run
//! summary can still tell a filesystem failure from a transport failure.
//!
//! ```rust
//! use hearth::domain::{HearthError, Result};
//! use hearth::domain::context::ResultExt;
//!
//! fn open_output(path: &str) -> Result<std::fs::File> {
//!     std::fs::File::open(path)
//!         .map_err(|e| HearthError::Filesystem(e.to_string()))
//!         .with_context(|| format!("opening {path}"))
//! }
//! ```

use crate::domain::errors::HearthError;
use crate::domain::result::Result;

/// Extension trait for adding context to `Result` types
pub trait ResultExt<T> {
    /// Add context to an error (evaluated eagerly)
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static;

    /// Add context to an error, computed only on failure
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<HearthError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| prefix(e.into(), &context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| {
            let context = f();
            prefix(e.into(), &context)
        })
    }
}

fn prefix(error: HearthError, context: &dyn std::fmt::Display) -> HearthError {
    match error {
        HearthError::Configuration(msg) => HearthError::Configuration(format!("{context}: {msg}")),
        HearthError::Transport(msg) => HearthError::Transport(format!("{context}: {msg}")),
        HearthError::Decode(msg) => HearthError::Decode(format!("{context}: {msg}")),
        HearthError::InvalidInput(msg) => HearthError::InvalidInput(format!("{context}: {msg}")),
        HearthError::Filesystem(msg) => HearthError::Filesystem(format!("{context}: {msg}")),
        HearthError::Io(msg) => HearthError::Io(format!("{context}: {msg}")),
        HearthError::Other(msg) => HearthError::Other(format!("{context}: {msg}")),
        // Structured variants keep their fields
        other @ (HearthError::HttpStatus { .. }
        | HearthError::PageExhausted { .. }
        | HearthError::Cancelled) => other,
    }
}
