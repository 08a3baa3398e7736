//! Query request

use super::FilterNode;
use super::compile;
use crate::error::QueryError;

/// Everything needed to compile a query: collection, selection, filter, cap.
///
/// Built by the fluent [`Query`](super::Query) builder, or by hand.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryRequest {
    /// The entity set name (e.g. "leads").
    pub collection: String,
    /// Selected remote field names, in order.
    pub fields: Vec<String>,
    /// Root of the filter tree.
    pub filter: Option<FilterNode>,
    /// Maximum number of rows.
    pub top: Option<u32>,
}

impl QueryRequest {
    /// Creates an empty request over `collection`.
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            ..Self::default()
        }
    }

    /// Compiles the query options: `$select=...&$filter=...&$top=n`.
    pub fn query_string(&self) -> Result<String, QueryError> {
        compile::query_string(self)
    }

    /// Compiles the request path: `<collection>?<query options>`.
    pub fn path(&self) -> Result<String, QueryError> {
        compile::compile(self)
    }
}
