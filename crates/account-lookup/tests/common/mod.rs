//! Shared test fixtures: an in-memory entity store behind `EntitySearch`.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use account_lookup::net::odata::{Filter, JoinOperator, ODataQuery};
use account_lookup::net::{EntitySearch, NetworkError, Record, Result};
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use parking_lot::Mutex;
use serde_json::Value;

/// Records of one entity set, filtered the way the Web API evaluates
/// `contains` (case-insensitive substring).
#[derive(Default)]
pub struct InMemorySearch {
    entity_set: String,
    records: Vec<Record>,
    failing: Mutex<bool>,
    /// Delay applied to searches whose query string contains the fragment.
    delays: Mutex<Vec<(String, Duration)>>,
    /// Every `(entity_set, query string)` received.
    pub requests: Mutex<Vec<(String, String)>>,
}

impl InMemorySearch {
    pub fn new(entity_set: &str) -> Self {
        Self {
            entity_set: entity_set.to_string(),
            ..Default::default()
        }
    }

    pub fn with_record(mut self, record: Value) -> Self {
        if let Value::Object(map) = record {
            self.records.push(map);
        }
        self
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock() = failing;
    }

    pub fn delay_when(&self, fragment: &str, delay: Duration) {
        self.delays.lock().push((fragment.to_string(), delay));
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn search(&self, entity_set: &str, query: &ODataQuery) -> Result<Vec<Record>> {
        if *self.failing.lock() {
            return Err(NetworkError::Connection("connection refused".to_string()));
        }
        if entity_set != self.entity_set {
            return Err(NetworkError::HttpStatus {
                status: 404,
                message: Some(format!("Resource not found for the segment '{entity_set}'.")),
            });
        }

        let columns = query.selected_columns();
        Ok(self
            .records
            .iter()
            .filter(|record| query.filter_expr().is_none_or(|f| matches(f, record)))
            .map(|record| {
                record
                    .iter()
                    .filter(|(key, _)| columns.is_empty() || columns.contains(key))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .collect())
    }
}

fn matches(filter: &Filter, record: &Record) -> bool {
    match filter {
        Filter::Contains { column, value } => record
            .get(column)
            .and_then(Value::as_str)
            .is_some_and(|text| text.to_lowercase().contains(&value.to_lowercase())),
        Filter::Join { operator, operands } => match operator {
            JoinOperator::And => operands.iter().all(|f| matches(f, record)),
            JoinOperator::Or => operands.iter().any(|f| matches(f, record)),
        },
    }
}

impl EntitySearch for InMemorySearch {
    fn retrieve_multiple<'a>(
        &'a self,
        entity_set: &'a str,
        query: &'a ODataQuery,
    ) -> BoxFuture<'a, Result<Vec<Record>>> {
        let query_string = query.to_query_string();
        let delay = self
            .delays
            .lock()
            .iter()
            .find(|(fragment, _)| query_string.contains(fragment.as_str()))
            .map(|(_, delay)| *delay);
        self.requests
            .lock()
            .push((entity_set.to_string(), query_string));

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            self.search(entity_set, query)
        }
        .boxed()
    }
}

/// A store with a few accounts.
pub fn accounts() -> InMemorySearch {
    InMemorySearch::new("accounts")
        .with_record(serde_json::json!({"name": "Acme", "accountid": "a-1"}))
        .with_record(serde_json::json!({"name": "Acme Corp", "accountid": "a-2"}))
        .with_record(serde_json::json!({"name": "Fabrikam", "accountid": "a-3"}))
        .with_record(serde_json::json!({"name": "O'Brien Ltd", "accountid": "a-4"}))
        .with_record(serde_json::json!({"name": "Northwind"}))
}

/// Install a test subscriber honouring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
