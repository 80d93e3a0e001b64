//! Init command implementation
//!
//! Writes a sample configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "hearth.toml")]
    pub output: String,

    /// Include commented explanations for every setting
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Hearth configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: hearth validate-config");
                println!("  3. Download photos: hearth fetch");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"# Hearth Configuration File

[application]
log_level = "info"
dry_run = false

[catalog]
base_url = "http://app-homevision-staging.herokuapp.com/api_project/houses"
page_count = 10
timeout_seconds = 30

[catalog.retry]
max_retries = 0
initial_delay_ms = 250
max_delay_ms = 10000
backoff_multiplier = 2.0
jitter = true

[download]
output_directory = "photos"
max_concurrency = 16
overwrite_existing = false
timeout_seconds = 60

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# Hearth Configuration File
#
# Every value below is optional; the defaults are shown.
# ${VAR} references are replaced with environment variables on load.
# HEARTH_<SECTION>_<KEY> variables override the file, e.g.
#   HEARTH_CATALOG_PAGE_COUNT=3 hearth fetch

[application]
# trace | debug | info | warn | error
log_level = "info"

# Fetch the catalog and log the filenames without downloading anything
dry_run = false

[catalog]
# Paginated listing endpoint. Either include a {page} placeholder, e.g.
#   base_url = "https://listings.example.com/api/houses/{page}"
# or leave it out and a page=<n> query parameter is appended.
base_url = "http://app-homevision-staging.herokuapp.com/api_project/houses"

# Pages 1..=page_count are fetched in order
page_count = 10

# Per-request timeout for catalog pages
timeout_seconds = 30

[catalog.retry]
# 0 retries every page until it succeeds. A positive value gives up
# after that many attempts and aborts the run (exit code 5).
max_retries = 0

# Exponential backoff between attempts
initial_delay_ms = 250
max_delay_ms = 10000
backoff_multiplier = 2.0

# Randomize each delay by up to 25%
jitter = true

[download]
# Created on demand; may be set from the environment
# output_directory = "${HEARTH_PHOTO_DIR}"
output_directory = "photos"

# Downloads in flight at once (0 = one per record, unbounded)
max_concurrency = 16

# Replace files left by a previous run instead of reporting them as failures
overwrite_existing = false

# Per-request timeout for photo downloads, body included
timeout_seconds = 60

[logging]
# JSON log file in addition to console output
local_enabled = false
local_path = "logs"

# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;
    use tempfile::TempDir;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "hearth.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "hearth.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generated_configs_parse() {
        let minimal = load_config_from_str(&InitArgs::generate_minimal_config()).unwrap();
        assert_eq!(minimal.catalog.page_count, 10);
        assert_eq!(minimal.download.max_concurrency, 16);

        let commented = load_config_from_str(&InitArgs::generate_config_with_examples()).unwrap();
        assert_eq!(commented.download.output_directory, "photos");
        assert_eq!(commented.catalog.retry.max_retries, 0);
    }

    #[tokio::test]
    async fn test_refuses_to_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("hearth.toml");
        fs::write(&path, "# keep me").unwrap();

        let mut args = InitArgs {
            output: path.to_string_lossy().into_owned(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "# keep me");

        args.force = true;
        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(fs::read_to_string(&path).unwrap().contains("[catalog]"));
    }
}
