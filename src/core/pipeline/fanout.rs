//! Parallel download phase
//!
//! One tokio task per record, tracked in a [`JoinSet`]. The set is drained with
//! `join_next`, so the wait ends only after every launched task has finished.
//! An optional [`Semaphore`] caps how many downloads run at once; all tasks are
//! still spawned up front.

use super::summary::DownloadFailure;
use crate::core::download::PhotoDownloader;
use crate::core::shutdown::wait_for_shutdown;
use crate::domain::{ErrorKind, HearthError, Record};
use crate::log_download_failure;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{watch, Semaphore};
use tokio::task::JoinSet;

/// Terminal outcome of one download task
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadOutcome {
    Saved { record_id: u64, path: PathBuf },
    Failed(DownloadFailure),
    /// Shutdown was requested before the download finished
    Cancelled { record_id: u64 },
}

/// Launches and awaits the download tasks
pub struct DownloadFanOut {
    downloader: PhotoDownloader,
    output_directory: PathBuf,
    limiter: Option<Arc<Semaphore>>,
}

impl DownloadFanOut {
    /// `max_concurrency == 0` runs every task at once
    pub fn new(downloader: PhotoDownloader, output_directory: PathBuf, max_concurrency: usize) -> Self {
        let limiter = (max_concurrency > 0).then(|| Arc::new(Semaphore::new(max_concurrency)));
        Self {
            downloader,
            output_directory,
            limiter,
        }
    }

    /// Download every record and return one outcome per launched task
    pub async fn run(&self, records: Vec<Record>, shutdown: &watch::Receiver<bool>) -> Vec<DownloadOutcome> {
        let mut tasks = JoinSet::new();

        for record in records {
            let downloader = self.downloader.clone();
            let output_directory = self.output_directory.clone();
            let limiter = self.limiter.clone();
            let shutdown = shutdown.clone();
            let record_id = record.id;

            tasks.spawn(async move {
                tokio::select! {
                    outcome = download_one(downloader, record, output_directory, limiter) => outcome,
                    _ = wait_for_shutdown(shutdown) => DownloadOutcome::Cancelled { record_id },
                }
            });
        }

        tracing::debug!(tasks = tasks.len(), "Download tasks launched");

        let mut outcomes = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    tracing::error!(error = %e, "Download task did not complete");
                    outcomes.push(DownloadOutcome::Failed(DownloadFailure::new(
                        None,
                        ErrorKind::Other,
                        format!("download task aborted: {e}"),
                    )));
                }
            }
        }

        outcomes
    }
}

async fn download_one(
    downloader: PhotoDownloader,
    record: Record,
    output_directory: PathBuf,
    limiter: Option<Arc<Semaphore>>,
) -> DownloadOutcome {
    let _permit = match limiter {
        Some(semaphore) => match semaphore.acquire_owned().await {
            Ok(permit) => Some(permit),
            Err(e) => {
                let error = HearthError::Other(format!("download limiter closed: {e}"));
                return DownloadOutcome::Failed(DownloadFailure::from_error(record.id, &error));
            }
        },
        None => None,
    };

    match downloader.download(&record, &output_directory).await {
        Ok(path) => DownloadOutcome::Saved {
            record_id: record.id,
            path,
        },
        Err(error) => {
            log_download_failure!(record.id, &error);
            DownloadOutcome::Failed(DownloadFailure::from_error(record.id, &error))
        }
    }
}
