//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::HearthConfig;
use crate::domain::errors::HearthError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into HearthConfig
/// 4. Applies environment variable overrides (HEARTH_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`HearthError::Configuration`] if the file is missing or unreadable,
/// a referenced variable is unset, parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use hearth::config::loader::load_config;
///
/// let config = load_config("hearth.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<HearthConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(HearthError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        HearthError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Builds a configuration from the defaults plus `HEARTH_*` overrides
///
/// Used when no configuration file exists at the default location.
pub fn load_default_config() -> Result<HearthConfig> {
    let mut config = HearthConfig::default();
    apply_env_overrides(&mut config);
    config.validate().map_err(|e| {
        HearthError::Configuration(format!("Configuration validation failed: {e}"))
    })?;
    Ok(config)
}

/// Parses, overrides and validates configuration text
pub fn load_config_from_str(contents: &str) -> Result<HearthConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: HearthConfig = toml::from_str(&contents)
        .map_err(|e| HearthError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        HearthError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched. Lowercase placeholders such as the
/// `{page}` marker in `catalog.base_url` never match.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| HearthError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(HearthError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using HEARTH_* prefix
///
/// Environment variables follow the pattern: HEARTH_<SECTION>_<KEY>, for
/// example HEARTH_CATALOG_BASE_URL or HEARTH_DOWNLOAD_OUTPUT_DIRECTORY.
/// Values that fail to parse are ignored.
fn apply_env_overrides(config: &mut HearthConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("HEARTH_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("HEARTH_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Catalog overrides
    if let Ok(val) = std::env::var("HEARTH_CATALOG_BASE_URL") {
        config.catalog.base_url = val;
    }
    if let Ok(val) = std::env::var("HEARTH_CATALOG_PAGE_COUNT") {
        if let Ok(count) = val.parse() {
            config.catalog.page_count = count;
        }
    }
    if let Ok(val) = std::env::var("HEARTH_CATALOG_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.catalog.timeout_seconds = secs;
        }
    }
    if let Ok(val) = std::env::var("HEARTH_CATALOG_RETRY_MAX_RETRIES") {
        if let Ok(retries) = val.parse() {
            config.catalog.retry.max_retries = retries;
        }
    }

    // Download overrides
    if let Ok(val) = std::env::var("HEARTH_DOWNLOAD_OUTPUT_DIRECTORY") {
        config.download.output_directory = val;
    }
    if let Ok(val) = std::env::var("HEARTH_DOWNLOAD_MAX_CONCURRENCY") {
        if let Ok(concurrency) = val.parse() {
            config.download.max_concurrency = concurrency;
        }
    }
    if let Ok(val) = std::env::var("HEARTH_DOWNLOAD_OVERWRITE_EXISTING") {
        config.download.overwrite_existing = val.parse().unwrap_or(false);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("HEARTH_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("HEARTH_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
