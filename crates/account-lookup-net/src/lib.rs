//! Networking module for Account Lookup.
//!
//! This crate provides everything the lookup control needs to query an
//! entity store:
//!
//! - **OData queries**: `$filter` / `$select` construction with safe literal
//!   escaping ([`odata`])
//! - **Search seam**: the [`EntitySearch`] trait the widgets depend on
//! - **Web API client**: a reqwest-backed [`WebApiClient`] for Dataverse-style
//!   OData endpoints
//!
//! # Example
//!
//! ```ignore
//! use account_lookup_net::{EntitySearch, WebApiClient};
//! use account_lookup_net::odata::{Filter, JoinOperator, ODataQuery};
//!
//! let client = WebApiClient::builder("https://contoso.crm.dynamics.com")
//!     .bearer_auth(token)
//!     .build()?;
//!
//! let query = ODataQuery::new()
//!     .filter(Filter::contains_terms("name", "fabrikam", JoinOperator::Or))
//!     .select(["name", "accountid"]);
//!
//! for record in client.retrieve_multiple("accounts", &query).await? {
//!     println!("{:?}", record.get("name"));
//! }
//! ```

mod error;
pub mod odata;
mod search;
mod web_api;

pub use error::{NetworkError, Result};
pub use search::{EntitySearch, Record, RetrieveMultipleResult};
pub use web_api::{DEFAULT_API_VERSION, DEFAULT_TIMEOUT, WebApiClient, WebApiClientBuilder};
