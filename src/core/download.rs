//! Photo download for a single record

use crate::adapters::storage::{FileWriter, Storage};
use crate::adapters::transport::{ensure_success, BodyStream, HttpRequest, Transport};
use crate::core::naming::derive_filename;
use crate::domain::context::ResultExt;
use crate::domain::{HearthError, Record, Result};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;

/// Fetches one record's photo and streams it into the output directory
///
/// Failures affect only the record being downloaded.
#[derive(Clone)]
pub struct PhotoDownloader {
    transport: Arc<dyn Transport>,
    storage: Arc<dyn Storage>,
}

impl PhotoDownloader {
    pub fn new(transport: Arc<dyn Transport>, storage: Arc<dyn Storage>) -> Self {
        Self { transport, storage }
    }

    /// Download `record`'s photo into `output_directory`
    ///
    /// Returns the path written. The filename is derived before any network
    /// I/O, so an unnameable record never issues a request. A body that fails
    /// mid-stream leaves no file behind.
    ///
    /// # Errors
    ///
    /// - [`HearthError::InvalidInput`] when no filename can be derived
    /// - [`HearthError::Transport`] / [`HearthError::HttpStatus`] for the photo GET
    /// - [`HearthError::Filesystem`] when the directory, file or write fails
    pub async fn download(&self, record: &Record, output_directory: &Path) -> Result<PathBuf> {
        let filename = derive_filename(record)?;
        let target = output_directory.join(&filename);

        let response = self
            .transport
            .send(HttpRequest::get(record.photo_url.clone()))
            .await
            .with_context(|| format!("fetching photo for record {}", record.id))?;
        let response = ensure_success(response, &record.photo_url)?;

        self.storage.ensure_directory(output_directory).await?;
        let file = self.storage.create_file(&target).await?;

        let bytes_written = match write_body(file, response.body, record.id, &target).await {
            Ok(n) => n,
            Err(e) => {
                if let Err(remove_err) = self.storage.remove_file(&target).await {
                    tracing::warn!(
                        record_id = record.id,
                        path = %target.display(),
                        error = %remove_err,
                        "Could not remove partial photo"
                    );
                }
                return Err(e);
            }
        };

        tracing::debug!(
            record_id = record.id,
            path = %target.display(),
            bytes = bytes_written,
            "Photo saved"
        );

        Ok(target)
    }
}

/// Stream `body` into `file`, then flush and close it
async fn write_body(
    mut file: FileWriter,
    mut body: BodyStream,
    record_id: u64,
    target: &Path,
) -> Result<usize> {
    let mut bytes_written = 0usize;
    while let Some(chunk) = body.next().await {
        let chunk = chunk.with_context(|| format!("reading photo body for record {record_id}"))?;
        file.write_all(&chunk)
            .await
            .map_err(|e| HearthError::Filesystem(format!("writing {}: {e}", target.display())))?;
        bytes_written += chunk.len();
    }

    file.flush()
        .await
        .map_err(|e| HearthError::Filesystem(format!("flushing {}: {e}", target.display())))?;
    file.shutdown()
        .await
        .map_err(|e| HearthError::Filesystem(format!("closing {}: {e}", target.display())))?;

    Ok(bytes_written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalStorage;
    use crate::adapters::transport::HttpResponse;
    use async_trait::async_trait;
    use futures::stream;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct StaticTransport {
        status: u16,
        body: Vec<u8>,
        calls: AtomicUsize,
    }

    impl StaticTransport {
        fn new(status: u16, body: &[u8]) -> Arc<Self> {
            Arc::new(Self {
                status,
                body: body.to_vec(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Transport for StaticTransport {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(HttpResponse::from_bytes(self.status, self.body.clone()))
        }
    }

    struct ChunkedTransport;

    #[async_trait]
    impl Transport for ChunkedTransport {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse> {
            let chunks = vec![Ok(b"abc".to_vec()), Ok(b"def".to_vec()), Ok(b"ghi".to_vec())];
            Ok(HttpResponse::new(200, stream::iter(chunks).boxed()))
        }
    }

    /// Sends one chunk, then fails mid-body
    struct BrokenBodyTransport;

    #[async_trait]
    impl Transport for BrokenBodyTransport {
        async fn send(&self, _request: HttpRequest) -> Result<HttpResponse> {
            let chunks = vec![
                Ok(b"abc".to_vec()),
                Err(HearthError::Transport("connection reset".to_string())),
            ];
            Ok(HttpResponse::new(200, stream::iter(chunks).boxed()))
        }
    }

    fn record(id: u64, photo_url: &str) -> Record {
        Record::new(id, "1 Elm St.", "Jane Doe", 100, photo_url)
    }

    #[tokio::test]
    async fn test_download_writes_body_verbatim() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("photos");
        let downloader = PhotoDownloader::new(
            StaticTransport::new(200, b"\xff\xd8jpeg-bytes"),
            Arc::new(LocalStorage::default()),
        );

        let path = downloader
            .download(&record(3, "https://cdn.example.com/3.jpg"), &out)
            .await
            .unwrap();

        assert_eq!(path, out.join("3-JANE-DOE-1-Elm-St.jpg"));
        assert_eq!(std::fs::read(&path).unwrap(), b"\xff\xd8jpeg-bytes");
    }

    #[tokio::test]
    async fn test_download_concatenates_chunks() {
        let temp = TempDir::new().unwrap();
        let downloader =
            PhotoDownloader::new(Arc::new(ChunkedTransport), Arc::new(LocalStorage::default()));

        let path = downloader
            .download(&record(1, "https://cdn.example.com/1.png"), temp.path())
            .await
            .unwrap();

        assert_eq!(std::fs::read(path).unwrap(), b"abcdefghi");
    }

    #[tokio::test]
    async fn test_unnameable_record_issues_no_request() {
        let temp = TempDir::new().unwrap();
        let transport = StaticTransport::new(200, b"x");
        let downloader = PhotoDownloader::new(transport.clone(), Arc::new(LocalStorage::default()));

        let err = downloader
            .download(&record(9, "no-extension"), temp.path())
            .await
            .unwrap_err();

        assert!(matches!(err, HearthError::InvalidInput(_)));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_http_error_creates_no_file() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("photos");
        let downloader = PhotoDownloader::new(
            StaticTransport::new(500, b"oops"),
            Arc::new(LocalStorage::default()),
        );

        let err = downloader
            .download(&record(4, "https://cdn.example.com/4.jpg"), &out)
            .await
            .unwrap_err();

        assert!(matches!(err, HearthError::HttpStatus { status: 500, .. }));
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn test_existing_file_is_filesystem_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("5-JANE-DOE-1-Elm-St.jpg"), b"old").unwrap();
        let downloader = PhotoDownloader::new(
            StaticTransport::new(200, b"new"),
            Arc::new(LocalStorage::default()),
        );

        let err = downloader
            .download(&record(5, "https://cdn.example.com/5.jpg"), temp.path())
            .await
            .unwrap_err();

        assert!(matches!(err, HearthError::Filesystem(_)));
        assert_eq!(
            std::fs::read(temp.path().join("5-JANE-DOE-1-Elm-St.jpg")).unwrap(),
            b"old"
        );
    }

    #[tokio::test]
    async fn test_failed_body_removes_partial_file() {
        let temp = TempDir::new().unwrap();
        let storage = Arc::new(LocalStorage::default());
        let r = record(6, "https://cdn.example.com/6.jpg");
        let target = temp.path().join("6-JANE-DOE-1-Elm-St.jpg");

        let err = PhotoDownloader::new(Arc::new(BrokenBodyTransport), storage.clone())
            .download(&r, temp.path())
            .await
            .unwrap_err();
        assert!(matches!(err, HearthError::Transport(_)));
        assert!(!target.exists());

        // The next run can create the file again
        let path = PhotoDownloader::new(StaticTransport::new(200, b"whole"), storage)
            .download(&r, temp.path())
            .await
            .unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"whole");
    }
}
