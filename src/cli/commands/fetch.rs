//! Fetch command implementation
//!
//! Runs the full pipeline: fetch every catalog page, then download every
//! listing photo into the output directory.

use crate::cli::resolve_config;
use crate::config::HearthConfig;
use crate::core::pipeline::{PipelineCoordinator, RunSummary};
use crate::domain::HearthError;
use clap::Args;
use tokio::sync::watch;

/// How many failures the console summary lists before truncating
const MAX_LISTED_FAILURES: usize = 20;

/// Arguments for the fetch command
#[derive(Args, Debug, Default)]
pub struct FetchArgs {
    /// Override the listing API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override the number of pages to fetch
    #[arg(long)]
    pub pages: Option<u32>,

    /// Override the photo output directory
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Override the download concurrency cap (0 = unbounded)
    #[arg(long)]
    pub max_concurrency: Option<usize>,

    /// Fetch the catalog and derive filenames without downloading
    #[arg(long)]
    pub dry_run: bool,
}

impl FetchArgs {
    /// Execute the fetch command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting fetch command");

        let mut config = match resolve_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        if config.application.dry_run {
            println!("🔍 DRY RUN MODE - No photos will be downloaded");
            println!();
        }

        let coordinator = match PipelineCoordinator::new(&config, shutdown_signal) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create pipeline");
                eprintln!("Failed to initialize: {e}");
                return Ok(2);
            }
        };

        println!(
            "🚀 Fetching {} page(s) from {}",
            config.catalog.page_count, config.catalog.base_url
        );
        println!();

        let summary = match coordinator.run().await {
            Ok(s) => s,
            Err(e @ HearthError::PageExhausted { .. }) => {
                tracing::error!(error = %e, "Catalog fetch gave up");
                eprintln!("Fetch failed: {e}");
                eprintln!("   Set catalog.retry.max_retries = 0 to retry until the API recovers");
                return Ok(5);
            }
            Err(e @ HearthError::Configuration(_)) => {
                tracing::error!(error = %e, "Catalog fetch rejected by configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
            Err(e) => {
                tracing::error!(error = %e, "Run failed");
                eprintln!("Run failed: {e}");
                return Ok(5);
            }
        };

        print_summary(&summary);

        let exit_code = if summary.interrupted {
            println!("⚠️  Run interrupted. Photos already saved were kept.");
            tracing::info!("Run interrupted by user signal");
            130
        } else {
            println!("done");
            0
        };

        Ok(exit_code)
    }

    fn apply_overrides(&self, config: &mut HearthConfig) {
        if let Some(base_url) = &self.base_url {
            tracing::info!(base_url = %base_url, "Overriding base URL from CLI");
            config.catalog.base_url = base_url.clone();
        }

        if let Some(pages) = self.pages {
            tracing::info!(pages, "Overriding page count from CLI");
            config.catalog.page_count = pages;
        }

        if let Some(output_dir) = &self.output_dir {
            tracing::info!(output_dir = %output_dir, "Overriding output directory from CLI");
            config.download.output_directory = output_dir.clone();
        }

        if let Some(max_concurrency) = self.max_concurrency {
            tracing::info!(max_concurrency, "Overriding concurrency cap from CLI");
            config.download.max_concurrency = max_concurrency;
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
    }
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("📊 Run Summary:");
    println!("  Pages Fetched: {}", summary.pages_fetched);
    println!("  Fetch Attempts: {}", summary.fetch_attempts);
    println!("  Records: {}", summary.total_records);
    println!("  Downloaded: {}", summary.downloaded);
    if summary.skipped > 0 {
        println!("  Skipped (dry run): {}", summary.skipped);
    }
    println!("  Failed: {}", summary.failed);
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    if !summary.failures.is_empty() {
        println!("⚠️  Failed records:");
        for failure in summary.failures.iter().take(MAX_LISTED_FAILURES) {
            let id = failure
                .record_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "?".to_string());
            println!("  - {id} [{}]: {}", failure.kind, failure.message);
        }
        if summary.failures.len() > MAX_LISTED_FAILURES {
            println!(
                "  ... and {} more failures",
                summary.failures.len() - MAX_LISTED_FAILURES
            );
        }
        println!();
    }
}
