//! Core logic for Hearth.
//!
//! # Modules
//!
//! - [`naming`] - Deterministic output filenames
//! - [`retry`] - Exponential backoff for page fetches
//! - [`download`] - Single photo download to storage
//! - [`pipeline`] - Fetch phase, download fan-out and run summary
//! - [`shutdown`] - Shutdown signal helpers
//!
//! # Run Workflow
//!
//! 1. **Fetch**: Pages `1..=page_count` in order, each retried until it succeeds
//! 2. **Assemble**: Records appended to the catalog in page order
//! 3. **Fan out**: One download task per record, optionally capped
//! 4. **Wait**: Every task reaches a terminal outcome
//! 5. **Report**: Run summary with per-record failures
//!
//! # Example
//!
//! ```rust,no_run
//! use hearth::config::load_config;
//! use hearth::core::pipeline::PipelineCoordinator;
//! use hearth::core::shutdown;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("hearth.toml")?;
//! let coordinator = PipelineCoordinator::new(&config, shutdown::never())?;
//! let summary = coordinator.run().await?;
//! println!("saved {} photos", summary.downloaded);
//! # Ok(())
//! # }
//! ```

pub mod download;
pub mod naming;
pub mod pipeline;
pub mod retry;
pub mod shutdown;
