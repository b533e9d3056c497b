//! # fhirsync Engine
//!
//! Incremental download/sync engine for fhirsync.
//!
//! This crate provides:
//! - `DownloadWorkManager`: pagination and queueing state across resource types
//! - `Downloader`: drives the download loop and emits a progress stream
//! - `FhirTransport` abstraction with a mock for testing
//! - `HttpTransport` over a pluggable HTTP client
//! - Watermark-driven incremental queries via `DownloadContext`
//!
//! ## Architecture
//!
//! One sync pass traverses every configured resource type, including all of
//! its pagination, serially:
//!
//! 1. The work manager produces the next request url (a pending `next` page
//!    link always preempts the queue)
//! 2. The transport fetches and classifies the response
//! 3. The work manager consumes the response, recording any continuation
//!    link and extracting the entities
//! 4. The downloader surfaces progress as `Started` / `Success` / `Failure`
//!    events on a lazy, ordered, finite stream
//!
//! ## Key Invariants
//!
//! - At most one live continuation link, tied to the most recently
//!   requested resource type; it is served before the queue advances
//! - The watermark is read once per resource type per pass
//! - A failure on one request never aborts the rest of the pass
//! - The pass is strictly serial; the work manager is confined to one
//!   execution context and is not restartable mid-pass

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod downloader;
mod error;
mod http;
mod transport;
mod work_manager;

pub use config::{ResourceQuery, SyncConfig};
pub use downloader::{DownloadState, Downloader};
pub use error::{DownloadError, DownloadResult};
pub use http::{HttpClient, HttpTransport};
pub use transport::{FhirTransport, MockTransport};
pub use work_manager::{DownloadContext, DownloadWorkManager};
