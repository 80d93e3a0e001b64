//! `reqwest`-backed transport

use super::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::domain::{HearthError, Result};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Transport that issues requests with a shared `reqwest::Client`
///
/// # Example
///
/// ```no_run
/// use hearth::adapters::transport::{HttpRequest, ReqwestTransport, Transport};
///
/// # async fn example() -> hearth::domain::Result<()> {
/// let transport = ReqwestTransport::new(30)?;
/// let response = transport
///     .send(HttpRequest::get("http://app-homevision-staging.herokuapp.com/api_project/houses?page=1"))
///     .await?;
/// println!("status {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport whose requests time out after `timeout_seconds`
    ///
    /// The timeout covers the whole exchange, body included.
    pub fn new(timeout_seconds: u64) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(timeout_seconds))
            .connect_timeout(Duration::from_secs(timeout_seconds.min(30)))
            .user_agent(concat!("hearth/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HearthError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
        };

        tracing::trace!(method = %request.method, url = %request.url, "Sending request");

        let response = builder.send().await.map_err(|e| {
            HearthError::Transport(format!("{} {} failed: {e}", request.method, request.url))
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes_stream()
            .map(|chunk| {
                chunk
                    .map(|bytes| bytes.to_vec())
                    .map_err(|e| HearthError::Transport(format!("reading response body: {e}")))
            })
            .boxed();

        Ok(HttpResponse::new(status, body))
    }
}
