//! Core systems for Account Lookup.
//!
//! This crate provides the small foundation shared by the lookup widgets and
//! the networking layer:
//!
//! - **Signal/Slot System**: Type-safe notification from widgets to their owners
//! - **Geometry**: Points, sizes and rectangles used for panel anchoring
//! - **Colors**: CSS-style colors used by the status line and panel header
//! - **Logging**: `tracing` targets for filtering per subsystem
//!
//! # Signal/Slot Example
//!
//! ```
//! use account_lookup_core::Signal;
//!
//! let resolved = Signal::<bool>::new();
//!
//! let conn_id = resolved.connect(|duplicate| {
//!     println!("Duplicate: {}", duplicate);
//! });
//!
//! resolved.emit(true);
//! resolved.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;
mod types;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use types::{Color, Point, Rect, Size};
