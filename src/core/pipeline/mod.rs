//! Run orchestration
//!
//! - [`coordinator`] - Drives the fetch phase then the download phase
//! - [`fanout`] - One download task per record behind a `JoinSet` barrier
//! - [`state`] - Lifecycle states published over a `watch` channel
//! - [`summary`] - Counters and per-record failures for the finished run

pub mod coordinator;
pub mod fanout;
pub mod state;
pub mod summary;

pub use coordinator::{PipelineCoordinator, PipelineSettings};
pub use fanout::{DownloadFanOut, DownloadOutcome};
pub use state::PipelineState;
pub use summary::{DownloadFailure, RunSummary};
