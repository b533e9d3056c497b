//! Bundle payloads: paged result sets and transaction acknowledgements.

use crate::resource::Resource;
use serde::{Deserialize, Serialize};

/// The bundle shapes the sync engine accepts.
///
/// Any other bundle type on the wire fails deserialization and is treated
/// as an unrecognized response shape by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BundleType {
    /// A paged search result set carrying new data.
    #[serde(rename = "searchset")]
    SearchSet,
    /// Acknowledgement of writes already applied server-side.
    #[serde(rename = "transaction-response")]
    TransactionResponse,
}

/// A link attached to a bundle, such as the `next` page link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleLink {
    /// The link relation, e.g. `"next"` or `"self"`.
    pub relation: String,
    /// The link target url.
    pub url: String,
}

/// One entry of a bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BundleEntry {
    /// The entry's resource, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Resource>,
}

/// A bundle of resources returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    /// The bundle type tag.
    #[serde(rename = "type")]
    pub bundle_type: BundleType,
    /// Links attached to the bundle.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub link: Vec<BundleLink>,
    /// The bundle entries, in server order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<BundleEntry>,
}

impl Bundle {
    /// Creates an empty bundle of the given type.
    pub fn new(bundle_type: BundleType) -> Self {
        Self {
            bundle_type,
            link: Vec::new(),
            entry: Vec::new(),
        }
    }

    /// Adds a link.
    pub fn with_link(mut self, relation: impl Into<String>, url: impl Into<String>) -> Self {
        self.link.push(BundleLink {
            relation: relation.into(),
            url: url.into(),
        });
        self
    }

    /// Adds an entry carrying the given resource.
    pub fn with_entry(mut self, resource: Resource) -> Self {
        self.entry.push(BundleEntry {
            resource: Some(resource),
        });
        self
    }

    /// Returns the url of the first link tagged `next`, if any.
    pub fn next_link(&self) -> Option<&str> {
        self.link
            .iter()
            .find(|link| link.relation == "next")
            .map(|link| link.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceType;

    #[test]
    fn next_link_found() {
        let bundle = Bundle::new(BundleType::SearchSet)
            .with_link("self", "http://server/Patient")
            .with_link("next", "http://server/Patient?page=2");

        assert_eq!(bundle.next_link(), Some("http://server/Patient?page=2"));
    }

    #[test]
    fn next_link_absent() {
        let bundle = Bundle::new(BundleType::SearchSet).with_link("self", "http://server/Patient");
        assert_eq!(bundle.next_link(), None);
    }

    #[test]
    fn entries_keep_server_order() {
        let bundle = Bundle::new(BundleType::SearchSet)
            .with_entry(Resource::new(ResourceType::Patient, "p1"))
            .with_entry(Resource::new(ResourceType::Patient, "p2"));

        let ids: Vec<&str> = bundle
            .entry
            .iter()
            .filter_map(|e| e.resource.as_ref())
            .map(|r| r.logical_id())
            .collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[test]
    fn bundle_type_wire_names() {
        let json = serde_json::to_value(BundleType::TransactionResponse).unwrap();
        assert_eq!(json, serde_json::json!("transaction-response"));

        let parsed: BundleType = serde_json::from_value(serde_json::json!("searchset")).unwrap();
        assert_eq!(parsed, BundleType::SearchSet);

        assert!(serde_json::from_value::<BundleType>(serde_json::json!("batch")).is_err());
    }
}
