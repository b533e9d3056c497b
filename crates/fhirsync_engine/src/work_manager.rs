//! Download work manager: request sequencing and response processing.

use crate::config::{ResourceQuery, SyncConfig};
use crate::error::{DownloadError, DownloadResult};
use async_trait::async_trait;
use fhirsync_model::{Resource, ResourceType, ServerResponse};
use std::collections::VecDeque;

/// Message used when an operation outcome carries no diagnostic text.
const NO_DIAGNOSTICS_MESSAGE: &str = "Operation failed with no diagnostics";

/// Capability supplying the per-type watermark for incremental queries.
///
/// Owned by persistence, outside this engine. The engine reads the
/// watermark exactly once per resource type per pass so the pass observes
/// a single consistent cutoff.
#[async_trait]
pub trait DownloadContext: Send + Sync {
    /// Returns the timestamp of the most recently synced entity for the
    /// given resource type, or `None` if the type was never synced.
    async fn latest_timestamp_for(&self, resource_type: &ResourceType) -> Option<String>;
}

/// Owns all pagination and queueing state for one download pass.
///
/// Per resource type the state machine is
/// `Queued -> Requested -> (next link: Requested again | else advance)`,
/// and the pass is complete exactly when the queue is empty and no
/// continuation is pending. At most one continuation link is live at a
/// time, tied to the most recently requested resource type; it is always
/// served before the queue advances.
///
/// Not thread-safe: a pass is confined to one execution context, and a
/// fresh pass requires a fresh manager.
#[derive(Debug)]
pub struct DownloadWorkManager {
    queue: VecDeque<ResourceQuery>,
    in_flight: Option<ResourceType>,
    next_page_url: Option<String>,
}

impl DownloadWorkManager {
    /// Creates a work manager seeded with the configured resource queries.
    pub fn new(config: SyncConfig) -> Self {
        Self {
            queue: config.queries.into(),
            in_flight: None,
            next_page_url: None,
        }
    }

    /// The resource type of the most recently produced request, if any.
    pub fn in_flight_type(&self) -> Option<&ResourceType> {
        self.in_flight.as_ref()
    }

    /// True when a `next` page link is waiting to be served.
    pub fn has_pending_continuation(&self) -> bool {
        self.next_page_url.is_some()
    }

    /// Produces the next request url, or `None` when the pass is complete.
    ///
    /// A pending continuation link is returned verbatim (single-use)
    /// before the queue advances. Otherwise the next resource type is
    /// popped off the queue and its query url built from the configured
    /// parameters, the mandatory sort directive, and the watermark filter
    /// (omitted entirely when the context yields no timestamp or the
    /// empty string).
    pub async fn next_request_url(
        &mut self,
        context: &impl DownloadContext,
    ) -> Option<String> {
        if let Some(url) = self.next_page_url.take() {
            return Some(url);
        }

        let query = self.queue.pop_front()?;
        let timestamp = context.latest_timestamp_for(&query.resource_type).await;
        let url = build_query_url(&query, timestamp.as_deref());
        self.in_flight = Some(query.resource_type);
        Some(url)
    }

    /// Consumes a response: records any continuation link and extracts the
    /// downloaded entities in entry order.
    ///
    /// A transaction acknowledgement yields no entities and records no
    /// continuation. An operational outcome fails with
    /// [`DownloadError::Server`] carrying the first issue's diagnostics,
    /// so downstream can distinguish "no more data" from a rejected
    /// request.
    pub fn process_response(&mut self, response: ServerResponse) -> DownloadResult<Vec<Resource>> {
        match response {
            ServerResponse::SearchSet(bundle) => {
                if let Some(next) = bundle.next_link() {
                    self.next_page_url = Some(next.to_string());
                }
                Ok(bundle
                    .entry
                    .into_iter()
                    .filter_map(|entry| entry.resource)
                    .collect())
            }
            ServerResponse::TransactionResponse(_) => Ok(Vec::new()),
            ServerResponse::OperationOutcome(outcome) => {
                let message = outcome
                    .first_diagnostics()
                    .unwrap_or(NO_DIAGNOSTICS_MESSAGE);
                Err(DownloadError::Server(message.to_string()))
            }
        }
    }
}

/// Builds `<Type>?<params>&_sort=_lastUpdated[&_lastUpdated=<ts>]`.
///
/// Parameters appear in configured order; the sort directive and the
/// watermark filter are always appended last, the watermark last of all.
fn build_query_url(query: &ResourceQuery, timestamp: Option<&str>) -> String {
    let mut params: Vec<String> = query
        .params
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    params.push("_sort=_lastUpdated".to_string());
    if let Some(ts) = timestamp {
        if !ts.is_empty() {
            params.push(format!("_lastUpdated={ts}"));
        }
    }
    format!("{}?{}", query.resource_type, params.join("&"))
}
