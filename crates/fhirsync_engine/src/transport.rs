//! Transport layer abstraction for download requests.

use crate::error::{DownloadError, DownloadResult};
use async_trait::async_trait;
use fhirsync_model::ServerResponse;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A transport performs the network fetch for one request url and returns
/// a classified response.
///
/// This trait abstracts the network layer, allowing different
/// implementations (HTTP, mock for testing, etc.). Timeouts and retry
/// policy live behind this boundary or with the caller, not in the engine.
#[async_trait]
pub trait FhirTransport: Send + Sync {
    /// Fetches the given url and classifies the payload.
    async fn fetch(&self, url: &str) -> DownloadResult<ServerResponse>;
}

/// A mock transport for testing.
///
/// Responses are scripted in FIFO order; every requested url is recorded.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<DownloadResult<ServerResponse>>>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    /// Creates a new mock transport with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the next response.
    pub fn enqueue(&self, result: DownloadResult<ServerResponse>) {
        self.responses.lock().unwrap().push_back(result);
    }

    /// Scripts a successful response.
    pub fn enqueue_response(&self, response: impl Into<ServerResponse>) {
        self.enqueue(Ok(response.into()));
    }

    /// Scripts a failed response.
    pub fn enqueue_error(&self, error: DownloadError) {
        self.enqueue(Err(error));
    }

    /// Returns every url requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl FhirTransport for MockTransport {
    async fn fetch(&self, url: &str) -> DownloadResult<ServerResponse> {
        self.requests.lock().unwrap().push(url.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(DownloadError::transport_fatal(format!(
                    "no scripted response for {url}"
                )))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhirsync_model::{Bundle, BundleType};

    #[tokio::test]
    async fn mock_serves_responses_in_order() {
        let transport = MockTransport::new();
        transport.enqueue_response(Bundle::new(BundleType::SearchSet));
        transport.enqueue_error(DownloadError::transport_retryable("connection lost"));

        let first = transport.fetch("Patient?_sort=_lastUpdated").await;
        assert!(matches!(first, Ok(ServerResponse::SearchSet(_))));

        let second = transport.fetch("Observation?_sort=_lastUpdated").await;
        assert!(matches!(second, Err(DownloadError::Transport { .. })));

        assert_eq!(
            transport.requests(),
            vec!["Patient?_sort=_lastUpdated", "Observation?_sort=_lastUpdated"]
        );
    }

    #[tokio::test]
    async fn mock_fails_without_script() {
        let transport = MockTransport::new();
        let result = transport.fetch("Patient").await;
        assert!(matches!(
            result,
            Err(DownloadError::Transport { retryable: false, .. })
        ));
    }
}
