//! Cache key construction for upstream requests

use std::collections::BTreeMap;

/// Namespace used for every upstream API cache key
pub const UPSTREAM_NAMESPACE: &str = "rick_morty";

/// Parameters for cache key generation
///
/// Query components live in a `BTreeMap`, so the generated key does not depend
/// on the order parameters were supplied in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheKeyParams {
    /// Resource path (e.g. `character/1`)
    pub resource: String,
    /// Query components, kept sorted
    pub query: BTreeMap<String, String>,
}

impl CacheKeyParams {
    /// Creates new cache key parameters for a resource path
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            query: BTreeMap::new(),
        }
    }

    /// Adds a query component
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Builds parameters from a request path and its query pairs
    pub fn from_request(resource: &str, query: &[(&str, String)]) -> Self {
        query
            .iter()
            .fold(Self::new(resource), |params, (k, v)| params.with_param(*k, v.clone()))
    }

    /// Generates the key without a namespace
    pub fn generate(&self) -> String {
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}:{}", self.resource, query)
    }

    /// Generates the key with a namespace prefix
    pub fn generate_with_namespace(&self, namespace: &str) -> String {
        format!("{}:{}", namespace, self.generate())
    }
}
