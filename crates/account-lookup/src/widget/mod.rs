//! Widgets.
//!
//! - [`LookupField`]: the text input with duplicate detection
//! - [`FloatingPanel`]: the dropdown of candidates it drives
//! - [`ViewNode`]: the declarative tree both render into

pub mod candidate;
pub mod floating_panel;
pub mod lookup_field;
pub mod view;

pub use candidate::{Candidate, MISSING_ID, UNKNOWN_NAME};
pub use floating_panel::{FloatingPanel, PanelLayout};
pub use lookup_field::{
    FETCH_FAILED_MESSAGE, FieldEvent, FieldPhase, FieldState, LookupField, Resolution,
    SearchTicket, StatusColor,
};
pub use view::{LabelView, PanelView, TextInputView, ViewNode};
