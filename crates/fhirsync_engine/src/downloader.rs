//! Downloader: drives one sync pass and emits a progress stream.

use crate::config::SyncConfig;
use crate::error::DownloadError;
use crate::transport::FhirTransport;
use crate::work_manager::{DownloadContext, DownloadWorkManager};
use fhirsync_model::{Resource, ResourceType};
use futures_util::stream::{self, Stream};
use tracing::{debug, warn};

/// The externally observed unit of download progress.
///
/// One `Started` plus one `Success` or `Failure` is emitted per request,
/// in request order. `Success` with an empty resource list is a valid
/// outcome, not an error.
#[derive(Debug)]
pub enum DownloadState {
    /// A request for the given resource type is about to be issued.
    Started {
        /// The resource type being requested.
        resource_type: ResourceType,
    },
    /// A page was downloaded and unpacked.
    Success {
        /// The downloaded entities, in entry order.
        resources: Vec<Resource>,
    },
    /// A request failed; the pass continues with the next request.
    Failure {
        /// The error for this request.
        error: DownloadError,
    },
}

/// Drives the download loop for one sync pass.
///
/// The pass executes as a cooperative sequence of suspend points at each
/// network fetch; resource types are processed serially so continuation
/// handling stays ordered relative to queue advancement. Dropping the
/// stream between fetches cancels the pass: no further requests are
/// issued, and events already consumed remain valid.
///
/// A `Downloader` is single-use; a fresh pass requires a fresh instance
/// seeded with updated watermarks via the context.
pub struct Downloader<T> {
    work_manager: DownloadWorkManager,
    transport: T,
}

impl<T: FhirTransport> Downloader<T> {
    /// Creates a downloader for the configured resource queries.
    pub fn new(config: SyncConfig, transport: T) -> Self {
        Self {
            work_manager: DownloadWorkManager::new(config),
            transport,
        }
    }

    /// Runs the pass, consuming the downloader.
    ///
    /// Returns a lazy, ordered, finite stream of [`DownloadState`] events.
    /// The stream ends when the work manager yields no more request urls.
    pub fn download<C: DownloadContext>(
        self,
        context: C,
    ) -> impl Stream<Item = DownloadState> {
        let pass = DownloadPass {
            manager: self.work_manager,
            transport: self.transport,
            context,
            in_flight_url: None,
        };

        stream::unfold(pass, |mut pass| async move {
            if let Some(url) = pass.in_flight_url.take() {
                let event = pass.execute(&url).await;
                return Some((event, pass));
            }

            let url = pass.manager.next_request_url(&pass.context).await?;
            let resource_type = pass.manager.in_flight_type()?.clone();
            debug!("requesting {url}");
            pass.in_flight_url = Some(url);
            Some((DownloadState::Started { resource_type }, pass))
        })
    }
}

/// Owned state of one in-progress pass; confined to the stream.
struct DownloadPass<T, C> {
    manager: DownloadWorkManager,
    transport: T,
    context: C,
    in_flight_url: Option<String>,
}

impl<T: FhirTransport, C: DownloadContext> DownloadPass<T, C> {
    async fn execute(&mut self, url: &str) -> DownloadState {
        let fetched = self.transport.fetch(url).await;
        match fetched.and_then(|response| self.manager.process_response(response)) {
            Ok(resources) => DownloadState::Success { resources },
            Err(error) => {
                warn!("download of {url} failed: {error}");
                DownloadState::Failure { error }
            }
        }
    }
}
