//! Logging facilities for Account Lookup.
//!
//! All crates in the workspace log through the `tracing` crate. Nothing here
//! installs a subscriber; applications and tests do that themselves:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! tracing_subscriber::fmt()
//!     .with_env_filter(EnvFilter::new("account_lookup::field=debug"))
//!     .init();
//! ```

/// Span names used throughout Account Lookup for tracing.
pub mod span_names {
    /// A host lifecycle call (init, update_view, destroy).
    pub const LIFECYCLE: &str = "account_lookup::lifecycle";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "account_lookup_core::signal";
    /// Lookup field state machine target.
    pub const FIELD: &str = "account_lookup::field";
    /// Floating panel layout target.
    pub const PANEL: &str = "account_lookup::panel";
    /// Host adapter lifecycle target.
    pub const HOST: &str = "account_lookup::host";
    /// Configuration loading target.
    pub const CONFIG: &str = "account_lookup::config";
    /// OData query construction target.
    pub const ODATA: &str = "account_lookup_net::odata";
    /// Web API client target.
    pub const WEB_API: &str = "account_lookup_net::web_api";
}
