//! The standard control lifecycle.

use std::sync::Arc;

use super::container::Container;
use super::context::{Context, Outputs};
use crate::widget::ViewNode;

/// Callback a control invokes when its outputs changed; the host then calls
/// [`StandardControl::get_outputs`].
pub type NotifyOutputChanged = Arc<dyn Fn() + Send + Sync>;

/// A control embedded in a low-code host.
///
/// The host drives the four phases in order: `init` once, `update_view` on
/// every parameter or size change, `get_outputs` after each notification,
/// and `destroy` once when the control is removed. Calls are never
/// concurrent.
pub trait StandardControl {
    /// Capture the container and callback and perform the first render.
    fn init(
        &mut self,
        context: &Context,
        notify_output_changed: NotifyOutputChanged,
        container: Container,
    );

    /// Re-read parameters and re-render. Returns the rendered tree, which is
    /// also written into the container.
    fn update_view(&mut self, context: &Context) -> ViewNode;

    /// Values exposed to the host.
    fn get_outputs(&self) -> Outputs;

    /// Release the container and all resources.
    fn destroy(&mut self);
}
