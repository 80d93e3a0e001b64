//! Configuration schema types
//!
//! This module defines the configuration structure for Hearth. Every section
//! has defaults, so an empty TOML document is a valid configuration.

use serde::{Deserialize, Serialize};

/// Placeholder substituted with the page number in `catalog.base_url`
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Upper bound for `catalog.retry.max_delay_ms` (one hour)
pub const MAX_RETRY_DELAY_MS: u64 = 3_600_000;

/// Main Hearth configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HearthConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Listing API settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Photo download settings
    #[serde(default)]
    pub download: DownloadConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HearthConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.catalog.validate()?;
        self.download.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (fetch and name, but don't download)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Retry configuration for page fetches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum attempts per page; 0 retries until success
    #[serde(default)]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Randomize each delay by up to +/-25%
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.backoff_multiplier < 1.0 {
            return Err("catalog.retry.backoff_multiplier must be >= 1.0".to_string());
        }
        if self.max_delay_ms > MAX_RETRY_DELAY_MS {
            return Err(format!(
                "catalog.retry.max_delay_ms must be <= {MAX_RETRY_DELAY_MS}"
            ));
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err(format!(
                "catalog.retry.initial_delay_ms ({}) cannot exceed max_delay_ms ({})",
                self.initial_delay_ms, self.max_delay_ms
            ));
        }
        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: true,
        }
    }
}

/// Listing API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the paginated listing endpoint
    ///
    /// May contain `{page}`; otherwise a `page` query parameter is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Number of pages to fetch, starting at 1
    #[serde(default = "default_page_count")]
    pub page_count: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl CatalogConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("catalog.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("catalog.base_url must start with http:// or https://".to_string());
        }

        let probe = self.base_url.replace(PAGE_PLACEHOLDER, "1");
        if let Err(e) = url::Url::parse(&probe) {
            return Err(format!("catalog.base_url is not a valid URL: {e}"));
        }

        if self.page_count == 0 {
            return Err("catalog.page_count must be at least 1".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("catalog.timeout_seconds must be greater than 0".to_string());
        }

        self.retry.validate()?;
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_count: default_page_count(),
            timeout_seconds: default_timeout_seconds(),
            retry: RetryConfig::default(),
        }
    }
}

/// Photo download configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory photos are written to (created on first use)
    #[serde(default = "default_output_directory")]
    pub output_directory: String,

    /// Downloads allowed in flight at once; 0 means one per record
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Truncate files that already exist instead of failing the record
    #[serde(default)]
    pub overwrite_existing: bool,

    /// Per-photo request timeout in seconds
    #[serde(default = "default_download_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl DownloadConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_directory.trim().is_empty() {
            return Err("download.output_directory cannot be empty".to_string());
        }

        if self.max_concurrency > 1024 {
            return Err(format!(
                "download.max_concurrency must be between 0 and 1024, got {}",
                self.max_concurrency
            ));
        }

        if self.timeout_seconds == 0 {
            return Err("download.timeout_seconds must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_directory: default_output_directory(),
            max_concurrency: default_max_concurrency(),
            overwrite_existing: false,
            timeout_seconds: default_download_timeout_seconds(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write JSON logs to a rolling local file
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "http://app-homevision-staging.herokuapp.com/api_project/houses".to_string()
}

fn default_page_count() -> u32 {
    10
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_initial_delay_ms() -> u64 {
    250
}

fn default_max_delay_ms() -> u64 {
    10000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_output_directory() -> String {
    "photos".to_string()
}

fn default_max_concurrency() -> usize {
    16
}

fn default_download_timeout_seconds() -> u64 {
    60
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
