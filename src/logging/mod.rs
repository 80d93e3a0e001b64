//! Logging
//!
//! Structured logging through `tracing`:
//! - Console output filtered by level or `RUST_LOG`
//! - Optional JSON log file with rotation
//!
//! # Example
//!
//! ```no_run
//! use hearth::logging::init_logging;
//! use hearth::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(page = 1, "Fetching catalog page");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a failed page fetch that will be retried
///
/// # Example
///
/// ```no_run
/// use hearth::log_retry_attempt;
///
/// let error = "connection reset";
/// log_retry_attempt!(3, 2, 500u64, error);
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($page:expr, $attempt:expr, $delay_ms:expr, $error:expr) => {
        tracing::warn!(
            page = $page,
            attempt = $attempt,
            delay_ms = $delay_ms,
            error = %$error,
            "Page fetch failed, retrying"
        );
    };
}

/// Log a record whose photo could not be saved
///
/// # Example
///
/// ```no_run
/// use hearth::log_download_failure;
/// use hearth::domain::HearthError;
///
/// let error = HearthError::InvalidInput("no extension".to_string());
/// log_download_failure!(7u64, &error);
/// ```
#[macro_export]
macro_rules! log_download_failure {
    ($record_id:expr, $error:expr) => {
        tracing::error!(
            record_id = $record_id,
            kind = %$error.kind(),
            error = %$error,
            "Photo download failed"
        );
    };
}

/// Log a phase boundary of the pipeline
///
/// # Example
///
/// ```no_run
/// use hearth::log_phase_complete;
/// use std::time::Duration;
///
/// log_phase_complete!("fetch", 100, Duration::from_millis(1200));
/// ```
#[macro_export]
macro_rules! log_phase_complete {
    ($phase:expr, $count:expr, $duration:expr) => {
        tracing::info!(
            phase = $phase,
            count = $count,
            duration_ms = $duration.as_millis() as u64,
            "Phase completed"
        );
    };
}
