//! The host-provided container the control renders into.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::widget::ViewNode;

#[derive(Debug, Default)]
struct ContainerInner {
    content: Option<ViewNode>,
    track_resize: bool,
}

/// A render target shared between the host and the control.
///
/// Cloning is cheap; clones refer to the same container, so the host keeps
/// one handle and reads what the control last rendered.
#[derive(Debug, Clone, Default)]
pub struct Container {
    inner: Arc<Mutex<ContainerInner>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rendered content.
    pub fn set_content(&self, content: ViewNode) {
        self.inner.lock().content = Some(content);
    }

    /// The last rendered content.
    pub fn content(&self) -> Option<ViewNode> {
        self.inner.lock().content.clone()
    }

    /// Remove whatever was rendered.
    pub fn clear(&self) {
        self.inner.lock().content = None;
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().content.is_none()
    }

    /// Ask the host to report the allocated size on every update.
    pub fn track_resize(&self, enabled: bool) {
        self.inner.lock().track_resize = enabled;
    }

    pub fn is_tracking_resize(&self) -> bool {
        self.inner.lock().track_resize
    }
}
