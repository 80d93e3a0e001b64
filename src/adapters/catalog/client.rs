//! Listing API client
//!
//! [`CatalogClient`] fetches exactly one page per call and never retries; the
//! pipeline coordinator owns the retry policy.

use super::models::HousesPage;
use crate::adapters::transport::{ensure_success, HttpRequest, Transport};
use crate::config::{CatalogConfig, PAGE_PLACEHOLDER};
use crate::domain::context::ResultExt;
use crate::domain::{HearthError, Page, Record, Result};
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

/// Source of catalog pages
///
/// # Example
///
/// ```no_run
/// use hearth::adapters::catalog::{CatalogClient, PageFetcher};
/// use hearth::adapters::transport::ReqwestTransport;
/// use std::sync::Arc;
///
/// # async fn example() -> hearth::domain::Result<()> {
/// let transport = Arc::new(ReqwestTransport::new(30)?);
/// let client = CatalogClient::new(transport, "https://listings.example.com/api/houses");
///
/// let page = client.fetch_page(1).await?;
/// println!("page 1 has {} records", page.len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a single 1-indexed page
    ///
    /// # Errors
    ///
    /// - [`HearthError::Transport`] when the request cannot be completed
    /// - [`HearthError::HttpStatus`] for a non-success status
    /// - [`HearthError::Decode`] when the payload is not a page of houses
    async fn fetch_page(&self, page_number: u32) -> Result<Page>;
}

/// Client for the paginated listing endpoint
pub struct CatalogClient {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl CatalogClient {
    pub fn new(transport: Arc<dyn Transport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    /// Build a client from the `[catalog]` configuration section
    pub fn from_config(transport: Arc<dyn Transport>, config: &CatalogConfig) -> Self {
        Self::new(transport, config.base_url.clone())
    }

    /// URL for a given page
    ///
    /// A `{page}` placeholder is substituted in place; otherwise a `page`
    /// query pair is appended, keeping any existing query.
    pub fn page_url(&self, page_number: u32) -> Result<String> {
        if self.base_url.contains(PAGE_PLACEHOLDER) {
            return Ok(self
                .base_url
                .replace(PAGE_PLACEHOLDER, &page_number.to_string()));
        }

        let mut url = Url::parse(&self.base_url).map_err(|e| {
            HearthError::Configuration(format!("Invalid catalog URL {}: {e}", self.base_url))
        })?;
        url.query_pairs_mut()
            .append_pair("page", &page_number.to_string());
        Ok(url.into())
    }
}

#[async_trait]
impl PageFetcher for CatalogClient {
    async fn fetch_page(&self, page_number: u32) -> Result<Page> {
        let url = self.page_url(page_number)?;

        tracing::debug!(page = page_number, url = %url, "Fetching catalog page");

        let response = self.transport.send(HttpRequest::get(url.clone())).await?;
        let response = ensure_success(response, &url)?;
        let body = response
            .into_bytes()
            .await
            .with_context(|| format!("reading page {page_number}"))?;

        let decoded: HousesPage = serde_json::from_slice(&body)
            .map_err(HearthError::from)
            .with_context(|| format!("decoding page {page_number}"))?;

        let records: Vec<Record> = decoded.houses.into_iter().map(Record::from).collect();

        tracing::debug!(
            page = page_number,
            records = records.len(),
            "Decoded catalog page"
        );

        Ok(Page::new(page_number, records))
    }
}
