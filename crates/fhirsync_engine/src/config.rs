//! Configuration for the download engine.

use fhirsync_model::ResourceType;
use indexmap::IndexMap;

/// One resource type of interest with its search parameters.
///
/// Parameters keep their configured order (unique keys); that order is a
/// compatibility contract with the server, not cosmetic.
#[derive(Debug, Clone)]
pub struct ResourceQuery {
    /// The resource type to download.
    pub resource_type: ResourceType,
    /// Search parameters, serialized in configured order.
    pub params: IndexMap<String, String>,
}

impl ResourceQuery {
    /// Creates a query with no search parameters.
    pub fn new(resource_type: ResourceType) -> Self {
        Self {
            resource_type,
            params: IndexMap::new(),
        }
    }

    /// Adds a search parameter. A repeated name replaces the earlier value
    /// but keeps its original position.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

/// Configuration for one sync pass.
///
/// Built once at engine construction and immutable thereafter. Resource
/// types are requested in the order they were configured.
#[derive(Debug, Clone, Default)]
pub struct SyncConfig {
    /// The configured resource queries, in request order.
    pub queries: Vec<ResourceQuery>,
}

impl SyncConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource query.
    pub fn with_query(mut self, query: ResourceQuery) -> Self {
        self.queries.push(query);
        self
    }

    /// Adds a resource type with no search parameters.
    pub fn with_resource_type(self, resource_type: ResourceType) -> Self {
        self.with_query(ResourceQuery::new(resource_type))
    }
}
