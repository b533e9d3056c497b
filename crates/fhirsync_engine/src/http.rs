//! HTTP transport implementation.
//!
//! The actual HTTP client is abstracted via a trait to allow different
//! implementations (reqwest, hyper, etc.) without binding this crate to
//! one of them.

use crate::error::{DownloadError, DownloadResult};
use crate::transport::FhirTransport;
use async_trait::async_trait;
use fhirsync_model::ServerResponse;

/// HTTP client abstraction.
///
/// Implement this trait to provide the actual HTTP transport. Timeouts,
/// authentication headers and connection pooling belong to the
/// implementation, not to the engine.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends a GET request and returns the response body.
    async fn get(&self, url: &str) -> Result<Vec<u8>, String>;
}

/// HTTP-based download transport.
///
/// Joins relative request urls onto a base url (absolute continuation
/// links pass through verbatim), parses the JSON body, and classifies it
/// into a [`ServerResponse`].
pub struct HttpTransport<C: HttpClient> {
    /// Base url of the server (e.g. "https://fhir.example.com/fhir").
    base_url: String,
    /// HTTP client implementation.
    client: C,
}

impl<C: HttpClient> HttpTransport<C> {
    /// Creates a new HTTP transport.
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    /// Returns the base url.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resolve_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}/{}", self.base_url.trim_end_matches('/'), url)
        }
    }
}

#[async_trait]
impl<C: HttpClient> FhirTransport for HttpTransport<C> {
    async fn fetch(&self, url: &str) -> DownloadResult<ServerResponse> {
        let target = self.resolve_url(url);
        let body = self
            .client
            .get(&target)
            .await
            .map_err(DownloadError::transport_retryable)?;

        let value: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|e| DownloadError::Classification(format!("invalid response body: {e}")))?;

        ServerResponse::from_json(value).map_err(DownloadError::from)
    }
}
