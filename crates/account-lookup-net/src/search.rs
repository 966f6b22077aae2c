//! The entity search seam.
//!
//! Widgets never talk to HTTP directly. They depend on [`EntitySearch`],
//! which [`WebApiClient`](crate::WebApiClient) implements for a live
//! environment and tests implement with canned records.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde::Deserialize;

use crate::error::Result;
use crate::odata::ODataQuery;

/// One record returned by a search: column logical name to JSON value.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Body of a collection response (`{"value": [...]}`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetrieveMultipleResult {
    /// The matching records.
    #[serde(default)]
    pub value: Vec<Record>,
    /// Link to the next page, when the server paged the result.
    #[serde(rename = "@odata.nextLink", default)]
    pub next_link: Option<String>,
}

/// A source of entity records that can be queried with OData options.
pub trait EntitySearch: Send + Sync {
    /// Retrieve the records of `entity_set` that match `query`.
    ///
    /// `entity_set` is the plural logical name of the table (e.g.
    /// `accounts`).
    fn retrieve_multiple<'a>(
        &'a self,
        entity_set: &'a str,
        query: &'a ODataQuery,
    ) -> BoxFuture<'a, Result<Vec<Record>>>;
}

impl<T: EntitySearch + ?Sized> EntitySearch for Arc<T> {
    fn retrieve_multiple<'a>(
        &'a self,
        entity_set: &'a str,
        query: &'a ODataQuery,
    ) -> BoxFuture<'a, Result<Vec<Record>>> {
        (**self).retrieve_multiple(entity_set, query)
    }
}
