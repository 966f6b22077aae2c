//! Account Lookup - a duplicate-detecting lookup field for low-code hosts.
//!
//! This is the main crate: it re-exports the core and networking crates and
//! provides the widgets and the host integration.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use account_lookup::prelude::*;
//!
//! let client = WebApiClient::builder("https://contoso.crm.dynamics.com")
//!     .bearer_auth(token)
//!     .build()?;
//!
//! let config = LookupConfig {
//!     filter_column: "name".into(),
//!     identifier_column: "accountid".into(),
//!     entity_set: "accounts".into(),
//!     ..Default::default()
//! };
//!
//! let mut field = LookupField::new(config, Arc::new(client));
//! field.edit_text("Contoso").await;
//! let resolution = field.focus_out();
//! ```

pub use account_lookup_core::*;

/// Networking: OData queries, the search seam and the Web API client.
pub mod net {
    pub use account_lookup_net::*;
}

pub mod config;
pub mod host;
pub mod prelude;
pub mod widget;

pub use config::{ConfigError, LookupConfig};
