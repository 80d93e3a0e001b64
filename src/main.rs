// Hearth - Listing Photo Downloader
// Copyright (c) 2025 Hearth Contributors
// Licensed under the MIT License

use clap::Parser;
use hearth::cli::{resolve_config, Cli, Commands};
use hearth::config::LoggingConfig;
use hearth::core::shutdown::wait_for_signal;
use hearth::logging::init_logging;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Commands report configuration errors themselves; logging falls back to
    // console-only defaults when the file cannot be loaded here.
    let (config_log_level, logging_config) = match resolve_config(&cli.config) {
        Ok(config) => (config.application.log_level, config.logging),
        Err(_) => ("info".to_string(), LoggingConfig::default()),
    };
    let log_level = cli.log_level.clone().unwrap_or(config_log_level);

    let logging_guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(2);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Hearth - Listing Photo Downloader"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        #[cfg(unix)]
        let terminate = {
            use tokio::signal::unix::{signal, SignalKind};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => Some(async move {
                    sigterm.recv().await;
                }),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to create SIGTERM handler, listening for Ctrl+C only");
                    None
                }
            }
        };
        #[cfg(not(unix))]
        let terminate: Option<std::future::Pending<()>> = None;

        wait_for_signal(tokio::signal::ctrl_c(), terminate).await;
        println!("\n⚠️  Shutdown signal received, stopping downloads...");
        let _ = shutdown_tx.send(true);
    });

    let exit_code = match execute_command(&cli, shutdown_rx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors; flush the file writer first
    drop(logging_guard);
    process::exit(exit_code);
}

async fn execute_command(cli: &Cli, shutdown_signal: watch::Receiver<bool>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Fetch(args) => args.execute(&cli.config, shutdown_signal).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
