//! Output storage abstraction
//!
//! Photo bytes are written through the [`Storage`] trait so the downloader can
//! be exercised against a temporary directory or an in-memory double.

mod local;

pub use local::LocalStorage;

use crate::domain::Result;
use async_trait::async_trait;
use std::path::Path;
use tokio::io::AsyncWrite;

/// Writable handle returned by [`Storage::create_file`]
pub type FileWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Capability to create directories, create files and discard partial ones
#[async_trait]
pub trait Storage: Send + Sync {
    /// Create `path` and its parents if absent
    ///
    /// Must succeed when the directory already exists, including when another
    /// task creates it concurrently.
    async fn ensure_directory(&self, path: &Path) -> Result<()>;

    /// Create a new file at `path` and return a writer for it
    async fn create_file(&self, path: &Path) -> Result<FileWriter>;

    /// Delete a file left incomplete by a failed write
    async fn remove_file(&self, path: &Path) -> Result<()>;
}
