//! Host integration.
//!
//! Low-code hosts embed controls through a four-phase lifecycle
//! ([`StandardControl`]). This module defines that lifecycle, the values a
//! host passes in ([`Context`], [`Parameters`]) and gets back ([`Outputs`]),
//! and [`AccountLookup`], the control that wraps a
//! [`LookupField`](crate::widget::LookupField).

mod adapter;
mod container;
mod context;
mod control;

pub use adapter::{AccountLookup, DEFAULT_INPUT_HEIGHT};
pub use container::Container;
pub use context::{Context, Outputs, ParameterValue, Parameters, param};
pub use control::{NotifyOutputChanged, StandardControl};
