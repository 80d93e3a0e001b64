//! Run summary and reporting
//!
//! Tracks what the pipeline fetched and downloaded, plus every record whose
//! photo could not be saved.

use crate::domain::{ErrorKind, HearthError};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// A record whose download did not succeed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadFailure {
    /// `None` when the task panicked before reporting its record
    pub record_id: Option<u64>,

    /// Error class
    pub kind: ErrorKind,

    /// Human-readable cause
    pub message: String,
}

impl DownloadFailure {
    pub fn new(record_id: Option<u64>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            record_id,
            kind,
            message: message.into(),
        }
    }

    /// Build a failure from a domain error
    pub fn from_error(record_id: u64, error: &HearthError) -> Self {
        Self::new(Some(record_id), error.kind(), error.to_string())
    }
}

/// Summary of a pipeline run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Pages fetched successfully
    pub pages_fetched: u32,

    /// Fetch attempts across all pages, retries included
    pub fetch_attempts: usize,

    /// Records in the catalog
    pub total_records: usize,

    /// Photos written to disk
    pub downloaded: usize,

    /// Records that failed
    pub failed: usize,

    /// Records not downloaded because of dry run
    pub skipped: usize,

    /// Per-record failures
    pub failures: Vec<DownloadFailure>,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Wall-clock duration of the run
    pub duration: Duration,

    /// Whether a shutdown signal cut the run short
    pub interrupted: bool,
}

impl RunSummary {
    /// Create an empty summary stamped with the current time
    pub fn new() -> Self {
        Self {
            pages_fetched: 0,
            fetch_attempts: 0,
            total_records: 0,
            downloaded: 0,
            failed: 0,
            skipped: 0,
            failures: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
            duration: Duration::from_secs(0),
            interrupted: false,
        }
    }

    /// Record a failure and bump the failed counter
    pub fn add_failure(&mut self, failure: DownloadFailure) {
        self.failed += 1;
        self.failures.push(failure);
    }

    /// Stamp the finish time and duration
    pub fn finish(mut self, duration: Duration) -> Self {
        self.finished_at = Some(Utc::now());
        self.duration = duration;
        self
    }

    /// Failures whose class is storage (naming or filesystem)
    pub fn storage_failures(&self) -> usize {
        self.failures
            .iter()
            .filter(|f| f.kind.is_storage_class())
            .count()
    }

    /// Failures whose class is transport
    pub fn transport_failures(&self) -> usize {
        self.failures
            .iter()
            .filter(|f| f.kind == ErrorKind::Transport)
            .count()
    }

    /// Whether every record was saved (or skipped in dry run)
    pub fn is_successful(&self) -> bool {
        self.failed == 0 && !self.interrupted
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        let attempted = self.downloaded + self.failed;
        if attempted == 0 {
            return 100.0;
        }
        (self.downloaded as f64 / attempted as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            pages_fetched = self.pages_fetched,
            fetch_attempts = self.fetch_attempts,
            total_records = self.total_records,
            downloaded = self.downloaded,
            failed = self.failed,
            skipped = self.skipped,
            interrupted = self.interrupted,
            duration_ms = self.duration.as_millis() as u64,
            success_rate = format!("{:.2}%", self.success_rate()),
            "Run completed"
        );

        if !self.failures.is_empty() {
            tracing::warn!(
                failure_count = self.failures.len(),
                transport = self.transport_failures(),
                storage = self.storage_failures(),
                "Some photos were not saved"
            );
            for failure in &self.failures {
                tracing::warn!(
                    record_id = ?failure.record_id,
                    kind = %failure.kind,
                    message = %failure.message,
                    "Download failure"
                );
            }
        }
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}
