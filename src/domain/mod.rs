//! Domain models and types for Hearth.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Listing data** ([`Record`], [`Page`], [`Catalog`])
//! - **Error types** ([`HearthError`], [`ErrorKind`])
//! - **Result type alias** ([`Result`])
//! - **Context extension** ([`context::ResultExt`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, HearthError>`]:
//!
//! ```rust
//! use hearth::domain::{HearthError, Record, Result};
//!
//! fn check(record: &Record) -> Result<()> {
//!     if !record.photo_url.contains('.') {
//!         return Err(HearthError::InvalidInput(format!("record {} has no photo extension", record.id)));
//!     }
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod errors;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{ErrorKind, HearthError};
pub use record::{Catalog, Page, Record};
pub use result::Result;
