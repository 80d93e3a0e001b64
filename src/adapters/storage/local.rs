//! Local filesystem storage backed by `tokio::fs`

use super::{FileWriter, Storage};
use crate::domain::context::ResultExt;
use crate::domain::{HearthError, Result};
use async_trait::async_trait;
use std::path::Path;
use tokio::fs::{self, OpenOptions};

/// Writes photos to the local filesystem
///
/// Files are created exclusively unless `overwrite_existing` is set, in which
/// case an existing file is truncated.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    overwrite_existing: bool,
}

impl LocalStorage {
    pub fn new(overwrite_existing: bool) -> Self {
        Self { overwrite_existing }
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn ensure_directory(&self, path: &Path) -> Result<()> {
        // create_dir_all treats a concurrently created directory as success
        fs::create_dir_all(path)
            .await
            .map_err(|e| HearthError::Filesystem(e.to_string()))
            .with_context(|| format!("creating directory {}", path.display()))
    }

    async fn create_file(&self, path: &Path) -> Result<FileWriter> {
        let mut options = OpenOptions::new();
        options.write(true);
        if self.overwrite_existing {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let file = options
            .open(path)
            .await
            .map_err(|e| HearthError::Filesystem(e.to_string()))
            .with_context(|| format!("creating file {}", path.display()))?;

        Ok(Box::new(file))
    }

    async fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path)
            .await
            .map_err(|e| HearthError::Filesystem(e.to_string()))
            .with_context(|| format!("removing file {}", path.display()))
    }
}
