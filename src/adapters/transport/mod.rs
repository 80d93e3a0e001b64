//! HTTP transport abstraction
//!
//! The pipeline never talks to `reqwest` directly. It issues [`HttpRequest`]s
//! through the [`Transport`] trait and receives an [`HttpResponse`] whose body
//! is a stream of chunks, so photo bytes can go to disk without buffering the
//! whole file. Tests substitute in-memory transports.

mod http;

pub use http::ReqwestTransport;

use crate::domain::{HearthError, Result};
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};

/// Stream of body chunks
pub type BodyStream = BoxStream<'static, Result<Vec<u8>>>;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
        }
    }
}

/// A request issued through a [`Transport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
}

impl HttpRequest {
    /// Build a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
        }
    }
}

/// Status code plus streamed body
pub struct HttpResponse {
    pub status: u16,
    pub body: BodyStream,
}

impl HttpResponse {
    /// Wrap a status code and a body stream
    pub fn new(status: u16, body: BodyStream) -> Self {
        Self { status, body }
    }

    /// Response whose body is a single in-memory chunk
    pub fn from_bytes(status: u16, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        Self::new(status, stream::once(async move { Ok(body) }).boxed())
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Collect the whole body into memory
    ///
    /// # Errors
    ///
    /// Returns the first error yielded by the body stream.
    pub async fn into_bytes(self) -> Result<Vec<u8>> {
        let mut body = self.body;
        let mut buf = Vec::new();
        while let Some(chunk) = body.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf)
    }
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Capability to execute HTTP requests
///
/// Implementations report connection-level failures as
/// [`HearthError::Transport`] and leave status handling to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a request and return the status and body stream
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Map a non-success response to [`HearthError::HttpStatus`]
pub fn ensure_success(response: HttpResponse, url: &str) -> Result<HttpResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(HearthError::HttpStatus {
            status: response.status,
            url: url.to_string(),
        })
    }
}
