//! Configuration management for Hearth.
//!
//! Hearth reads an optional TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `HEARTH_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hearth::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("hearth.toml")?;
//!
//! println!("Listing API: {}", config.catalog.base_url);
//! println!("Pages: {}", config.catalog.page_count);
//! println!("Output: {}", config.download.output_directory);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run switch
//! - [`CatalogConfig`] - Listing API URL, page count, timeout and [`RetryConfig`]
//! - [`DownloadConfig`] - Output directory, concurrency cap, overwrite policy
//! - [`LoggingConfig`] - Optional rolling JSON log file
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [catalog]
//! base_url = "http://app-homevision-staging.herokuapp.com/api_project/houses"
//! page_count = 10
//!
//! [catalog.retry]
//! max_retries = 0          # retry each page until it succeeds
//! initial_delay_ms = 250
//! max_delay_ms = 10000
//!
//! [download]
//! output_directory = "${PHOTO_DIR}"
//! max_concurrency = 16
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str, load_default_config};
pub use schema::{
    ApplicationConfig, CatalogConfig, DownloadConfig, HearthConfig, LoggingConfig, RetryConfig,
    PAGE_PLACEHOLDER,
};
