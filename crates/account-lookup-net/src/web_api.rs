//! Web API client for entity search.
//!
//! [`WebApiClient`] talks to a Dataverse-style OData Web API: collection
//! requests go to `{environment}/api/data/v{version}/{entity_set}` with the
//! query options percent-encoded and the OData version headers set.
//!
//! # Example
//!
//! ```ignore
//! use account_lookup_net::{WebApiClient, odata::{Filter, JoinOperator, ODataQuery}};
//!
//! let client = WebApiClient::builder("https://contoso.crm.dynamics.com")
//!     .bearer_auth(token)
//!     .build()?;
//!
//! let query = ODataQuery::new()
//!     .filter(Filter::contains_terms("name", "contoso ltd", JoinOperator::Or))
//!     .select(["name", "accountid"]);
//!
//! let records = client.retrieve_multiple_records("accounts", &query).await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use http::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use url::Url;

use account_lookup_core::logging::targets;

use crate::error::{NetworkError, Result};
use crate::odata::ODataQuery;
use crate::search::{EntitySearch, Record, RetrieveMultipleResult};

/// Web API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "9.2";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for creating a [`WebApiClient`].
pub struct WebApiClientBuilder {
    environment_url: String,
    api_version: String,
    bearer_token: Option<String>,
    default_headers: HeaderMap,
    timeout: Duration,
    http_client: Option<reqwest::Client>,
}

impl WebApiClientBuilder {
    /// Create a new builder for the given environment URL
    /// (e.g. `https://contoso.crm.dynamics.com`).
    pub fn new(environment_url: impl Into<String>) -> Self {
        Self {
            environment_url: environment_url.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            bearer_token: None,
            default_headers: HeaderMap::new(),
            timeout: DEFAULT_TIMEOUT,
            http_client: None,
        }
    }

    /// Set the Web API version (`9.2` by default).
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set bearer token authentication.
    ///
    /// Adds `Authorization: Bearer <token>` to every request.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Add a default header that will be sent with every request.
    ///
    /// Invalid names or values are ignored.
    pub fn default_header(
        mut self,
        name: impl TryInto<HeaderName>,
        value: impl TryInto<HeaderValue>,
    ) -> Self {
        if let (Ok(name), Ok(value)) = (name.try_into(), value.try_into()) {
            self.default_headers.insert(name, value);
        }
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use an existing reqwest client instead of creating a new one.
    ///
    /// The builder's timeout is not applied to a supplied client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<WebApiClient> {
        let environment = self.environment_url.trim().trim_end_matches('/');
        let base_url = format!("{environment}/api/data/v{}", self.api_version);
        // Reject unusable environment URLs up front rather than on first search
        Url::parse(&base_url)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder().timeout(self.timeout).build()?,
        };

        let mut headers = HeaderMap::new();
        headers.insert(http::header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("odata-maxversion"),
            HeaderValue::from_static("4.0"),
        );
        headers.insert(
            HeaderName::from_static("odata-version"),
            HeaderValue::from_static("4.0"),
        );
        headers.extend(self.default_headers);
        if let Some(token) = &self.bearer_token {
            let mut value = HeaderValue::try_from(format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(http::header::AUTHORIZATION, value);
        }

        Ok(WebApiClient {
            inner: Arc::new(WebApiClientInner {
                http_client,
                base_url,
                headers,
            }),
        })
    }
}

struct WebApiClientInner {
    http_client: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
}

/// An OData Web API client implementing [`EntitySearch`].
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct WebApiClient {
    inner: Arc<WebApiClientInner>,
}

impl WebApiClient {
    /// Create a new builder for the given environment URL.
    pub fn builder(environment_url: impl Into<String>) -> WebApiClientBuilder {
        WebApiClientBuilder::new(environment_url)
    }

    /// The Web API root, e.g. `https://contoso.crm.dynamics.com/api/data/v9.2`.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Build the full request URL for a collection query.
    pub fn collection_url(&self, entity_set: &str, query: &ODataQuery) -> Result<Url> {
        let mut url = Url::parse(&self.inner.base_url)?;
        url.path_segments_mut()
            .map_err(|_| NetworkError::InvalidUrl(self.inner.base_url.clone()))?
            .pop_if_empty()
            .push(entity_set);
        let pairs = query.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// Retrieve the records of `entity_set` matching `query`.
    ///
    /// Only the first page is returned; the next-page link, if any, is
    /// preserved in the result.
    #[tracing::instrument(
        skip_all,
        target = "account_lookup_net::web_api",
        level = "debug",
        fields(entity_set = %entity_set)
    )]
    pub async fn retrieve_multiple_records(
        &self,
        entity_set: &str,
        query: &ODataQuery,
    ) -> Result<RetrieveMultipleResult> {
        let url = self.collection_url(entity_set, query)?;
        tracing::debug!(target: targets::WEB_API, %url, "sending retrieve multiple request");

        let response = self
            .inner
            .http_client
            .get(url)
            .headers(self.inner.headers.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            tracing::warn!(
                target: targets::WEB_API,
                status = status.as_u16(),
                message = message.as_deref().unwrap_or(""),
                "retrieve multiple request failed"
            );
            return Err(NetworkError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        let result: RetrieveMultipleResult = serde_json::from_slice(&bytes)?;
        tracing::debug!(target: targets::WEB_API, count = result.value.len(), "records retrieved");
        Ok(result)
    }
}

impl EntitySearch for WebApiClient {
    fn retrieve_multiple<'a>(
        &'a self,
        entity_set: &'a str,
        query: &'a ODataQuery,
    ) -> BoxFuture<'a, Result<Vec<Record>>> {
        Box::pin(async move {
            let result = self.retrieve_multiple_records(entity_set, query).await?;
            Ok(result.value)
        })
    }
}

impl std::fmt::Debug for WebApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebApiClient")
            .field("base_url", &self.inner.base_url)
            .field(
                "has_auth",
                &self.inner.headers.contains_key(http::header::AUTHORIZATION),
            )
            .finish()
    }
}

/// Error payload returned by the Web API (`{"error": {"code", "message"}}`).
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

fn error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => Some(body.trim().to_string()),
    }
}
