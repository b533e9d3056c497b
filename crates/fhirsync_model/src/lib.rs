//! # fhirsync Model
//!
//! FHIR resource model and server response classification for fhirsync.
//!
//! This crate provides:
//! - `ResourceType` for the resource categories queried independently
//! - `Resource`, a JSON envelope over a downloaded entity
//! - `Bundle` for paged result sets and transaction acknowledgements
//! - `OperationOutcome` for operational error payloads
//! - `ServerResponse`, the structural classification over the three
//!   response shapes a server may return
//!
//! This is a pure model crate with no I/O operations. Only the fields the
//! sync engine inspects are modelled as typed fields; everything else a
//! resource carries is preserved in a flattened JSON map.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod bundle;
mod error;
mod outcome;
mod resource;
mod response;

pub use bundle::{Bundle, BundleEntry, BundleLink, BundleType};
pub use error::{ModelError, ModelResult};
pub use outcome::{OperationOutcome, OperationOutcomeIssue};
pub use resource::{Resource, ResourceMeta, ResourceType};
pub use response::ServerResponse;
