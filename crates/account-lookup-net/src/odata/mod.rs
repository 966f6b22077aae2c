//! OData query construction.
//!
//! This module builds the system query options sent with a "retrieve
//! multiple" request: a `$filter` expression and a `$select` column list.
//!
//! # Example
//!
//! ```
//! use account_lookup_net::odata::{Filter, JoinOperator, ODataQuery};
//!
//! let query = ODataQuery::new()
//!     .filter(Filter::contains_terms("name", "foo bar", JoinOperator::Or))
//!     .select(["name", "accountid"]);
//!
//! assert_eq!(
//!     query.to_query_string(),
//!     "?$filter=contains(name,'foo') or contains(name,'bar')&$select=name,accountid"
//! );
//! ```

mod filter;

pub use filter::{Filter, JoinOperator, UnknownJoinOperator, string_literal};

/// System query options for a collection request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ODataQuery {
    filter: Option<Filter>,
    select: Vec<String>,
}

impl ODataQuery {
    /// Create an empty query (no options).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `$filter` expression.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set the `$select` column list.
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Get the `$filter` expression, if any.
    pub fn filter_expr(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    /// Get the `$select` columns.
    pub fn selected_columns(&self) -> &[String] {
        &self.select
    }

    /// Query options as unencoded key/value pairs, ready for URL encoding.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(filter) = &self.filter {
            pairs.push(("$filter".to_string(), filter.to_string()));
        }
        if !self.select.is_empty() {
            pairs.push(("$select".to_string(), self.select.join(",")));
        }
        pairs
    }

    /// Render the options in the unencoded `?$filter=…&$select=…` form used
    /// by client-side Web API helpers.
    ///
    /// Returns an empty string when no option is set.
    pub fn to_query_string(&self) -> String {
        let pairs = self.query_pairs();
        if pairs.is_empty() {
            return String::new();
        }
        let joined: Vec<String> = pairs.iter().map(|(k, v)| format!("{k}={v}")).collect();
        format!("?{}", joined.join("&"))
    }
}
