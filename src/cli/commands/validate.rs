//! Validate config command implementation
//!
//! Loads the configuration file and prints the effective settings.

use crate::cli::resolve_config;
use crate::config::HearthConfig;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // resolve_config validates on load
        match resolve_config(config_path) {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!();
                print_config(&config);
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2)
            }
        }
    }
}

fn print_config(config: &HearthConfig) {
    let retry = &config.catalog.retry;
    let max_retries = if retry.max_retries == 0 {
        "unbounded".to_string()
    } else {
        retry.max_retries.to_string()
    };
    let max_concurrency = if config.download.max_concurrency == 0 {
        "unbounded".to_string()
    } else {
        config.download.max_concurrency.to_string()
    };

    println!("Configuration Summary:");
    println!("  Log Level: {}", config.application.log_level);
    println!("  Dry Run: {}", config.application.dry_run);
    println!("  Listing API: {}", config.catalog.base_url);
    println!("  Pages: {}", config.catalog.page_count);
    println!("  Catalog Timeout: {}s", config.catalog.timeout_seconds);
    println!(
        "  Retry: max {} attempts, {}ms → {}ms (x{})",
        max_retries, retry.initial_delay_ms, retry.max_delay_ms, retry.backoff_multiplier
    );
    println!("  Output Directory: {}", config.download.output_directory);
    println!("  Max Concurrency: {max_concurrency}");
    println!("  Overwrite Existing: {}", config.download.overwrite_existing);
    println!("  Download Timeout: {}s", config.download.timeout_seconds);
    if config.logging.local_enabled {
        println!(
            "  Log File: {}/hearth.log ({})",
            config.logging.local_path, config.logging.local_rotation
        );
    }
    println!();
}
