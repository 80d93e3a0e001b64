// Hearth - Listing Photo Downloader
// Copyright (c) 2025 Hearth Contributors
// Licensed under the MIT License

//! # Hearth - Listing Photo Downloader
//!
//! Hearth pulls a paginated catalog of property listings from an HTTP API and
//! saves every listing's photo to disk under a deterministic filename.
//!
//! ## Overview
//!
//! A run has two phases:
//! - **Fetch**: pages `1..=page_count` are requested one after another, each
//!   retried with exponential backoff until it succeeds
//! - **Download**: one task per record streams the photo into the output
//!   directory; a failed record never affects the others
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Naming, retry, downloads and pipeline orchestration
//! - [`adapters`] - HTTP transport, filesystem storage, listing API client
//! - [`domain`] - Records, catalog and the error taxonomy
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hearth::config::load_default_config;
//! use hearth::core::pipeline::PipelineCoordinator;
//! use hearth::core::shutdown;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_default_config()?;
//!     let coordinator = PipelineCoordinator::new(&config, shutdown::never())?;
//!
//!     let summary = coordinator.run().await?;
//!     println!("Saved {} of {} photos", summary.downloaded, summary.total_records);
//!     Ok(())
//! }
//! ```
//!
//! ## Filenames
//!
//! ```rust
//! use hearth::core::naming::derive_filename;
//! use hearth::domain::Record;
//!
//! let record = Record::new(
//!     1,
//!     "123 Main St., Cary, NC 27513",
//!     "Kevin O'Leary",
//!     0,
//!     "https://example.com/photo.jpg",
//! );
//! assert_eq!(
//!     derive_filename(&record).unwrap(),
//!     "1-KEVIN-OLEARY-123-Main-St-Cary-NC-27513.jpg"
//! );
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`], whose error type is
//! [`domain::HearthError`]:
//!
//! ```rust,no_run
//! use hearth::domain::HearthError;
//!
//! fn example() -> Result<(), HearthError> {
//!     let config = hearth::config::load_config("hearth.toml")?;
//!     println!("{} pages", config.catalog.page_count);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
