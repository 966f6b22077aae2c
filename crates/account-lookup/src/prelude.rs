//! Prelude module for Account Lookup.
//!
//! ```ignore
//! use account_lookup::prelude::*;
//! ```
//!
//! This provides access to:
//! - Signal/slot system (`Signal`, `ConnectionId`)
//! - The lookup widgets (`LookupField`, `FloatingPanel`, `ViewNode`)
//! - Host integration (`AccountLookup`, `StandardControl`, `Context`)
//! - Searching (`EntitySearch`, `WebApiClient`, `ODataQuery`)

// ============================================================================
// Signal/Slot System
// ============================================================================

pub use crate::{ConnectionGuard, ConnectionId, Signal};

// ============================================================================
// Geometry
// ============================================================================

pub use crate::{Color, Point, Rect, Size};

// ============================================================================
// Widgets
// ============================================================================

pub use crate::widget::{
    Candidate, FieldEvent, FieldPhase, FloatingPanel, LookupField, Resolution, SearchTicket,
    StatusColor, ViewNode,
};

// ============================================================================
// Configuration
// ============================================================================

pub use crate::config::LookupConfig;

// ============================================================================
// Host Integration
// ============================================================================

pub use crate::host::{AccountLookup, Container, Context, Outputs, Parameters, StandardControl};

// ============================================================================
// Searching
// ============================================================================

pub use account_lookup_net::odata::{Filter, JoinOperator, ODataQuery};
pub use account_lookup_net::{EntitySearch, NetworkError, Record, WebApiClient};
