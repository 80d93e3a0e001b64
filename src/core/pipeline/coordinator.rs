//! Pipeline coordinator - orchestrates the fetch and download phases
//!
//! Pages are fetched strictly in order, each one retried until it succeeds.
//! Once the catalog is complete every record gets its own download task, and
//! the coordinator waits for all of them before reporting the run as done.

use super::fanout::{DownloadFanOut, DownloadOutcome};
use super::state::PipelineState;
use super::summary::{DownloadFailure, RunSummary};
use crate::adapters::catalog::{CatalogClient, PageFetcher};
use crate::adapters::storage::LocalStorage;
use crate::adapters::transport::ReqwestTransport;
use crate::config::HearthConfig;
use crate::core::download::PhotoDownloader;
use crate::core::naming::derive_filename;
use crate::core::retry::{retry_until_success, RetryPolicy};
use crate::core::shutdown::is_shutdown_requested;
use crate::domain::{Catalog, HearthError, Record, Result};
use crate::log_phase_complete;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Run parameters taken from the configuration
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub page_count: u32,
    pub output_directory: PathBuf,
    /// 0 = unbounded
    pub max_concurrency: usize,
    pub dry_run: bool,
    pub retry: RetryPolicy,
}

impl PipelineSettings {
    pub fn from_config(config: &HearthConfig) -> Self {
        Self {
            page_count: config.catalog.page_count,
            output_directory: PathBuf::from(&config.download.output_directory),
            max_concurrency: config.download.max_concurrency,
            dry_run: config.application.dry_run,
            retry: RetryPolicy::from_config(&config.catalog.retry),
        }
    }
}

/// Drives a run from `Idle` to `Done`
pub struct PipelineCoordinator {
    fetcher: Arc<dyn PageFetcher>,
    downloader: PhotoDownloader,
    settings: PipelineSettings,
    shutdown: watch::Receiver<bool>,
    state: watch::Sender<PipelineState>,
}

impl PipelineCoordinator {
    /// Create a coordinator backed by HTTP and the local filesystem
    ///
    /// Catalog and photo requests use separate clients so each honours its
    /// own timeout.
    pub fn new(config: &HearthConfig, shutdown: watch::Receiver<bool>) -> Result<Self> {
        let catalog_transport = Arc::new(ReqwestTransport::new(config.catalog.timeout_seconds)?);
        let download_transport = Arc::new(ReqwestTransport::new(config.download.timeout_seconds)?);

        let fetcher = Arc::new(CatalogClient::from_config(catalog_transport, &config.catalog));
        let storage = Arc::new(LocalStorage::new(config.download.overwrite_existing));
        let downloader = PhotoDownloader::new(download_transport, storage);

        Ok(Self::with_components(
            fetcher,
            downloader,
            PipelineSettings::from_config(config),
            shutdown,
        ))
    }

    /// Create a coordinator from explicit components
    pub fn with_components(
        fetcher: Arc<dyn PageFetcher>,
        downloader: PhotoDownloader,
        settings: PipelineSettings,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        let (state, _) = watch::channel(PipelineState::Idle);
        Self {
            fetcher,
            downloader,
            settings,
            shutdown,
            state,
        }
    }

    /// Observe state changes
    pub fn subscribe_state(&self) -> watch::Receiver<PipelineState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> PipelineState {
        *self.state.borrow()
    }

    /// Execute the run
    ///
    /// An interrupted run still returns `Ok` with `interrupted` set. Download
    /// failures are collected in the summary and never fail the run.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::PageExhausted`] when a bounded retry policy gives
    /// up on a page.
    pub async fn run(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let mut summary = RunSummary::new();

        tracing::info!(
            pages = self.settings.page_count,
            output_directory = %self.settings.output_directory.display(),
            max_concurrency = self.settings.max_concurrency,
            dry_run = self.settings.dry_run,
            "Starting run"
        );

        let catalog = match self.fetch_catalog(&mut summary).await {
            Ok(catalog) => catalog,
            Err(HearthError::Cancelled) => {
                tracing::warn!(pages_fetched = summary.pages_fetched, "Run interrupted during fetch phase");
                summary.interrupted = true;
                return Ok(self.finish(summary, start_time));
            }
            Err(e) => return Err(e),
        };

        summary.total_records = catalog.len();
        self.advance(PipelineState::CatalogReady {
            records: catalog.len(),
        })?;
        log_phase_complete!("fetch", catalog.len(), start_time.elapsed());

        let records = catalog.into_records();
        self.advance(PipelineState::Downloading {
            total: records.len(),
        })?;

        let download_start = Instant::now();
        if self.settings.dry_run {
            self.plan_downloads(&records, &mut summary);
        } else {
            self.download_all(records, &mut summary).await;
        }
        log_phase_complete!("download", summary.downloaded + summary.skipped, download_start.elapsed());

        if summary.interrupted {
            tracing::warn!(
                downloaded = summary.downloaded,
                "Run interrupted during download phase"
            );
        } else {
            self.advance(PipelineState::Done)?;
        }

        Ok(self.finish(summary, start_time))
    }

    async fn fetch_catalog(&self, summary: &mut RunSummary) -> Result<Catalog> {
        let mut catalog = Catalog::new();

        for page_number in 1..=self.settings.page_count {
            self.advance(PipelineState::Fetching { page: page_number })?;

            let fetcher = &self.fetcher;
            let outcome = retry_until_success(&self.settings.retry, &self.shutdown, page_number, || {
                fetcher.fetch_page(page_number)
            })
            .await?;

            summary.pages_fetched += 1;
            summary.fetch_attempts += outcome.attempts;

            tracing::info!(
                page = page_number,
                records = outcome.value.len(),
                attempts = outcome.attempts,
                "Fetched catalog page"
            );
            catalog.push_page(outcome.value);
        }

        tracing::debug!(
            pages = catalog.page_count(),
            records = catalog.len(),
            fetch_attempts = summary.fetch_attempts,
            "Catalog complete"
        );
        Ok(catalog)
    }

    /// Name every record without touching the network or disk
    fn plan_downloads(&self, records: &[Record], summary: &mut RunSummary) {
        for record in records {
            match derive_filename(record) {
                Ok(filename) => {
                    let target = self.settings.output_directory.join(filename);
                    tracing::info!(
                        record_id = record.id,
                        path = %target.display(),
                        "Dry run - would save photo"
                    );
                    summary.skipped += 1;
                }
                Err(e) => {
                    tracing::warn!(record_id = record.id, error = %e, "Dry run - record cannot be named");
                    summary.add_failure(DownloadFailure::from_error(record.id, &e));
                }
            }
        }
    }

    async fn download_all(&self, records: Vec<Record>, summary: &mut RunSummary) {
        let fanout = DownloadFanOut::new(
            self.downloader.clone(),
            self.settings.output_directory.clone(),
            self.settings.max_concurrency,
        );

        for outcome in fanout.run(records, &self.shutdown).await {
            match outcome {
                DownloadOutcome::Saved { .. } => summary.downloaded += 1,
                DownloadOutcome::Failed(failure) => summary.add_failure(failure),
                DownloadOutcome::Cancelled { .. } => summary.interrupted = true,
            }
        }

        if is_shutdown_requested(&self.shutdown) {
            summary.interrupted = true;
        }
    }

    fn advance(&self, next: PipelineState) -> Result<()> {
        let mut current = *self.state.borrow();
        current.transition(next, self.settings.page_count)?;
        self.state.send_replace(current);
        tracing::debug!(state = %current, "Pipeline state changed");
        Ok(())
    }

    fn finish(&self, summary: RunSummary, start_time: Instant) -> RunSummary {
        let summary = summary.finish(start_time.elapsed());
        summary.log_summary();
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::transport::{HttpRequest, HttpResponse, Transport};
    use crate::core::shutdown;
    use crate::domain::Page;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serves fixed pages and records the state seen at each fetch
    struct StateProbeFetcher {
        pages: Vec<Vec<Record>>,
        observed: Mutex<Vec<PipelineState>>,
        state: Mutex<Option<watch::Receiver<PipelineState>>>,
    }

    #[async_trait]
    impl PageFetcher for StateProbeFetcher {
        async fn fetch_page(&self, page_number: u32) -> Result<Page> {
            if let Some(rx) = self.state.lock().unwrap().as_ref() {
                self.observed.lock().unwrap().push(*rx.borrow());
            }
            let records = self.pages[(page_number - 1) as usize].clone();
            Ok(Page::new(page_number, records))
        }
    }

    struct CountingTransport {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Transport for CountingTransport {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(HttpResponse::from_bytes(200, b"jpeg".to_vec()))
        }
    }

    fn record(id: u64, photo_url: &str) -> Record {
        Record::new(id, format!("{id} Birch Rd."), "Sam Roe", 1, photo_url)
    }

    fn settings(dir: &TempDir, pages: u32, dry_run: bool) -> PipelineSettings {
        PipelineSettings {
            page_count: pages,
            output_directory: dir.path().join("photos"),
            max_concurrency: 0,
            dry_run,
            retry: RetryPolicy::immediate(),
        }
    }

    #[tokio::test]
    async fn test_states_follow_fetch_order() {
        let temp = TempDir::new().unwrap();
        let fetcher = Arc::new(StateProbeFetcher {
            pages: vec![
                vec![record(1, "https://cdn.test/1.jpg")],
                vec![record(2, "https://cdn.test/2.jpg")],
            ],
            observed: Mutex::new(Vec::new()),
            state: Mutex::new(None),
        });
        let transport = Arc::new(CountingTransport {
            calls: AtomicUsize::new(0),
        });
        let coordinator = PipelineCoordinator::with_components(
            fetcher.clone(),
            PhotoDownloader::new(transport.clone(), Arc::new(LocalStorage::default())),
            settings(&temp, 2, false),
            shutdown::never(),
        );
        *fetcher.state.lock().unwrap() = Some(coordinator.subscribe_state());

        assert_eq!(coordinator.state(), PipelineState::Idle);
        let summary = coordinator.run().await.unwrap();

        assert_eq!(
            *fetcher.observed.lock().unwrap(),
            vec![
                PipelineState::Fetching { page: 1 },
                PipelineState::Fetching { page: 2 }
            ]
        );
        assert_eq!(coordinator.state(), PipelineState::Done);
        assert_eq!(summary.pages_fetched, 2);
        assert_eq!(summary.fetch_attempts, 2);
        assert_eq!(summary.downloaded, 2);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_dry_run_downloads_nothing() {
        let temp = TempDir::new().unwrap();
        let fetcher = Arc::new(StateProbeFetcher {
            pages: vec![vec![
                record(1, "https://cdn.test/1.jpg"),
                record(2, "no-extension"),
            ]],
            observed: Mutex::new(Vec::new()),
            state: Mutex::new(None),
        });
        let transport = Arc::new(CountingTransport {
            calls: AtomicUsize::new(0),
        });
        let coordinator = PipelineCoordinator::with_components(
            fetcher,
            PhotoDownloader::new(transport.clone(), Arc::new(LocalStorage::default())),
            settings(&temp, 1, true),
            shutdown::never(),
        );

        let summary = coordinator.run().await.unwrap();

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failures[0].record_id, Some(2));
        assert_eq!(summary.downloaded, 0);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
        assert!(!temp.path().join("photos").exists());
        assert_eq!(coordinator.state(), PipelineState::Done);
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = HearthConfig::default();
        config.catalog.page_count = 3;
        config.download.output_directory = "out".to_string();
        config.application.dry_run = true;

        let settings = PipelineSettings::from_config(&config);
        assert_eq!(settings.page_count, 3);
        assert_eq!(settings.output_directory, PathBuf::from("out"));
        assert!(settings.dry_run);
        assert_eq!(settings.retry.max_attempts, None);
    }
}
