//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Hearth using clap.

pub mod commands;

use crate::config::{load_config, load_default_config, HearthConfig};
use crate::domain::Result;
use clap::{Parser, Subcommand};
use std::path::Path;

/// Configuration file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "hearth.toml";

/// Hearth - listing photo downloader
#[derive(Parser, Debug)]
#[command(name = "hearth")]
#[command(version, about, long_about = None)]
#[command(author = "Hearth Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, env = "HEARTH_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "HEARTH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the listing catalog and download every photo
    Fetch(commands::fetch::FetchArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

/// Load the configuration at `path`
///
/// A missing file at [`DEFAULT_CONFIG_PATH`] falls back to the built-in
/// defaults; any other missing path is an error.
pub fn resolve_config(path: &str) -> Result<HearthConfig> {
    if path == DEFAULT_CONFIG_PATH && !Path::new(path).exists() {
        tracing::debug!("No configuration file found, using defaults");
        return load_default_config();
    }
    load_config(path)
}
